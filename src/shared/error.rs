//! Application Error Types
//!
//! Centralized error handling with Axum integration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// The 401 every protected endpoint answers with before touching data.
    pub fn unauthorized() -> Self {
        AppError::Unauthorized("Unauthorized".into())
    }

    /// Map a unique-constraint violation to a 409 with the given message,
    /// anything else to a database error.
    pub fn from_unique_violation(err: sqlx::Error, message: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(message.to_string())
            }
            _ => AppError::Database(err),
        }
    }

    /// Map a foreign-key violation to a 404 naming the missing row, anything
    /// else to a database error. `references` pairs constraint names with
    /// the message to report.
    pub fn from_reference_violation(err: sqlx::Error, references: &[(&str, &str)]) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                let message = db_err
                    .constraint()
                    .and_then(|c| references.iter().find(|(name, _)| *name == c))
                    .map(|(_, message)| *message)
                    .unwrap_or("Referenced record not found");
                AppError::NotFound(message.to_string())
            }
            _ => AppError::Database(err),
        }
    }

    /// HTTP status this error renders with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Field-level validation error
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::NotFound(message)
            | AppError::BadRequest(message)
            | AppError::Unauthorized(message)
            | AppError::Conflict(message) => ErrorResponse {
                message,
                errors: None,
            },
            AppError::Validation { message, errors } => ErrorResponse {
                message,
                errors: Some(errors),
            },
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorResponse {
                    message: "Internal server error".into(),
                    errors: None,
                }
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                ErrorResponse {
                    message: "Internal server error".into(),
                    errors: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
