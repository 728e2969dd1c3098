use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sqlx::error::ErrorKind;
use thiserror::Error;
use tracing::error;

use crate::forms::FieldError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    ValidationError(Vec<FieldError>),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Database error")]
    DatabaseError(#[source] sqlx::Error),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

/// Narrow raw sqlx errors: constraint failures get their own outcome,
/// everything else stays an undifferentiated database error.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::ForeignKeyViolation => {
                    return AppError::ConstraintViolation(
                        "A referenced record does not exist".to_string(),
                    )
                }
                ErrorKind::UniqueViolation => {
                    return AppError::ConstraintViolation(
                        "A record with these values already exists".to_string(),
                    )
                }
                ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                    return AppError::ConstraintViolation(
                        "The submitted values violate a database constraint".to_string(),
                    )
                }
                _ => {}
            }
        }
        AppError::DatabaseError(err)
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConstraintViolation(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(fields) => {
                error!(error = ?self, field_count = fields.len(), "Validation error");
            }
            AppError::NotFound(msg)
            | AppError::ConstraintViolation(msg)
            | AppError::InternalServerError(msg) => {
                error!(error = ?self, message = %msg, "Application error");
            }
            AppError::DatabaseError(e) => {
                error!(error = ?e, "Database error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        // Log internal details
        self.log();

        // Validation surfaces every field message, both as flash text and as
        // structured details; database errors only expose a generic message.
        let (public_message, details) = match &self {
            AppError::ValidationError(fields) => {
                let lines: Vec<String> = fields.iter().map(FieldError::flash_line).collect();
                (lines.join("; "), Some(json!(fields)))
            }
            AppError::NotFound(msg)
            | AppError::ConstraintViolation(msg)
            | AppError::InternalServerError(msg) => (msg.clone(), None),
            AppError::DatabaseError(_) => ("A database error occurred".to_string(), None),
        };

        error_response(code, public_message, details, status)
    }
}

/// Attach the mutation's flash message to a persistence failure, keeping the
/// entity name that was captured before the write was attempted. Not-found
/// and validation errors pass through untouched.
pub fn persistence_failure(flash: impl Into<String>, err: AppError) -> AppError {
    match err {
        AppError::ConstraintViolation(_) => AppError::ConstraintViolation(flash.into()),
        AppError::DatabaseError(source) => {
            error!(error = ?source, "persistence failure");
            AppError::InternalServerError(flash.into())
        }
        other => other,
    }
}
