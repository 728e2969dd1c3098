//! Show page controllers: list and create.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use validator::Validate;

use crate::forms::{collect_field_errors, show_form_fields, ShowInput};
use crate::services::shows;
use crate::utils::error::{persistence_failure, AppError};
use crate::utils::response::{empty_success, success};
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let items = shows::list(&state.pool).await?;
    Ok(success(items, "All shows").into_response())
}

/// Form display: the fields a show submission is built from.
pub async fn create_form() -> Response {
    success(show_form_fields(), "New show form").into_response()
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ShowInput>,
) -> Result<Response, AppError> {
    input
        .validate()
        .map_err(|errors| AppError::ValidationError(collect_field_errors(&errors)))?;

    shows::insert(&state.pool, input)
        .await
        .map_err(|err| persistence_failure("An error occurred. Show could not be listed.", err))?;

    Ok(empty_success("Show was successfully added!").into_response())
}
