//! Venue page controllers: list, search, detail, create, edit, delete.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::forms::{collect_field_errors, form_choices, SearchForm, VenueInput};
use crate::services::venues;
use crate::utils::error::{persistence_failure, AppError};
use crate::utils::response::{empty_success, success};
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let areas = venues::list_grouped(&state.pool).await?;
    Ok(success(areas, "Venues by location").into_response())
}

pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Response, AppError> {
    let results = venues::search(&state.pool, &form.search_term).await?;
    Ok(success(results, format!("Search results for '{}'", form.search_term)).into_response())
}

pub async fn detail(
    State(state): State<AppState>,
    Path(venue_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let page = venues::detail(&state.pool, venue_id).await?;
    Ok(success(page, "Venue details").into_response())
}

/// Form display: the vocabularies the create form is built from.
pub async fn create_form() -> Response {
    success(form_choices(), "New venue form").into_response()
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<VenueInput>,
) -> Result<Response, AppError> {
    input
        .validate()
        .map_err(|errors| AppError::ValidationError(collect_field_errors(&errors)))?;

    // Capture the name before persisting so failure messages can use it.
    let name = input.name.clone();
    venues::insert(&state.pool, input).await.map_err(|err| {
        persistence_failure(
            format!("An error occurred. Venue {name} could not be added."),
            err,
        )
    })?;

    Ok(empty_success(format!("Venue {name} was successfully added!")).into_response())
}

/// Form display: the current record, for prefilling the edit form.
pub async fn edit_form(
    State(state): State<AppState>,
    Path(venue_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let venue = venues::find(&state.pool, venue_id).await?;
    Ok(success(venue, "Edit venue form").into_response())
}

pub async fn edit(
    State(state): State<AppState>,
    Path(venue_id): Path<Uuid>,
    Json(input): Json<VenueInput>,
) -> Result<Response, AppError> {
    let existing = venues::find(&state.pool, venue_id).await?;

    input
        .validate()
        .map_err(|errors| AppError::ValidationError(collect_field_errors(&errors)))?;

    let old_name = existing.name;
    let new_name = input.name.clone();
    venues::update(&state.pool, venue_id, input)
        .await
        .map_err(|err| {
            persistence_failure(
                format!("An error occurred. Venue {old_name} could not be edited."),
                err,
            )
        })?;

    Ok(empty_success(format!("Venue {new_name} was successfully edited!")).into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    Path(venue_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let name = venues::delete(&state.pool, venue_id)
        .await
        .map_err(|err| persistence_failure("An error occurred. Venue could not be deleted.", err))?;

    Ok(success(
        json!({ "success": true }),
        format!("Venue {name} was successfully deleted!"),
    )
    .into_response())
}
