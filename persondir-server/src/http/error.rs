//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::{CreateStep, DbError};
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request body rejected (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Read failed (500, cause returned to the caller)
    Query(DbError),

    /// Creation step failed and was rolled back (500, generic step message)
    Transaction { step: CreateStep, source: DbError },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => {
                tracing::debug!("Invalid input: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "Invalid input" }),
                )
            }
            Self::NotFound { resource, id } => {
                tracing::debug!(%id, "{} not found", resource);
                (
                    StatusCode::NOT_FOUND,
                    json!({ "message": format!("{} not found", resource) }),
                )
            }
            Self::Query(e) => {
                tracing::error!("Query error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": query_cause(e) }),
                )
            }
            Self::Transaction { step, source } => {
                tracing::error!(step = %step, "Transaction error: {}", source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": step.failure_message() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Underlying cause of a failed read, without the wrapper prefix.
fn query_cause(e: &DbError) -> String {
    match e {
        DbError::Sqlx(inner) | DbError::Step { source: inner, .. } => inner.to_string(),
        DbError::NotFound { .. } => e.to_string(),
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Step { step, .. } => Self::Transaction { step, source: e },
            DbError::Sqlx(_) => Self::Query(e),
        }
    }
}
