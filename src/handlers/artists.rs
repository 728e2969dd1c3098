//! Artist page controllers: list, search, detail, create, edit.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use uuid::Uuid;
use validator::Validate;

use crate::forms::{collect_field_errors, form_choices, ArtistInput, SearchForm};
use crate::services::artists;
use crate::utils::error::{persistence_failure, AppError};
use crate::utils::response::{empty_success, success};
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let items = artists::list(&state.pool).await?;
    Ok(success(items, "All artists").into_response())
}

pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Response, AppError> {
    let results = artists::search(&state.pool, &form.search_term).await?;
    Ok(success(results, format!("Search results for '{}'", form.search_term)).into_response())
}

pub async fn detail(
    State(state): State<AppState>,
    Path(artist_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let page = artists::detail(&state.pool, artist_id).await?;
    Ok(success(page, "Artist details").into_response())
}

/// Form display: the vocabularies the create form is built from.
pub async fn create_form() -> Response {
    success(form_choices(), "New artist form").into_response()
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ArtistInput>,
) -> Result<Response, AppError> {
    input
        .validate()
        .map_err(|errors| AppError::ValidationError(collect_field_errors(&errors)))?;

    let name = input.name.clone();
    artists::insert(&state.pool, input).await.map_err(|err| {
        persistence_failure(
            format!("An error occurred. Artist {name} could not be added."),
            err,
        )
    })?;

    Ok(empty_success(format!("Artist {name} was successfully added!")).into_response())
}

/// Form display: the current record, for prefilling the edit form.
pub async fn edit_form(
    State(state): State<AppState>,
    Path(artist_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let artist = artists::find(&state.pool, artist_id).await?;
    Ok(success(artist, "Edit artist form").into_response())
}

pub async fn edit(
    State(state): State<AppState>,
    Path(artist_id): Path<Uuid>,
    Json(input): Json<ArtistInput>,
) -> Result<Response, AppError> {
    let existing = artists::find(&state.pool, artist_id).await?;

    input
        .validate()
        .map_err(|errors| AppError::ValidationError(collect_field_errors(&errors)))?;

    let old_name = existing.name;
    let new_name = input.name.clone();
    artists::update(&state.pool, artist_id, input)
        .await
        .map_err(|err| {
            persistence_failure(
                format!("An error occurred. Artist {old_name} could not be edited."),
                err,
            )
        })?;

    Ok(empty_success(format!("Artist {new_name} was successfully edited!")).into_response())
}
