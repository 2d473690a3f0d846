//! Error types for the Bookshelf server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Classified result of a book operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Ok,
    Updated,
    Deleted,
    ValidationFailed,
    NotFound,
    StoreInconsistent,
}

impl Outcome {
    /// HTTP status the adapter answers with for this outcome
    pub fn status_code(self) -> StatusCode {
        match self {
            Outcome::Created => StatusCode::CREATED,
            Outcome::Ok | Outcome::Updated | Outcome::Deleted => StatusCode::OK,
            Outcome::ValidationFailed => StatusCode::BAD_REQUEST,
            Outcome::NotFound => StatusCode::NOT_FOUND,
            Outcome::StoreInconsistent => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Main application error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store inconsistent: {0}")]
    StoreInconsistent(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn outcome(&self) -> Outcome {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => Outcome::ValidationFailed,
            AppError::NotFound(_) => Outcome::NotFound,
            AppError::StoreInconsistent(_) => Outcome::StoreInconsistent,
        }
    }

    /// Client-facing message, without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::StoreInconsistent(msg)
            | AppError::BadRequest(msg) => msg,
        }
    }
}

/// Error response body
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// "fail" for client errors, "error" for server errors
    pub status: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let outcome = self.outcome();
        let status = match &self {
            AppError::StoreInconsistent(msg) => {
                tracing::error!("Store inconsistent: {}", msg);
                "error"
            }
            _ => "fail",
        };

        let body = Json(ErrorResponse {
            status: status.to_string(),
            message: self.message().to_string(),
        });

        (outcome.status_code(), body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
