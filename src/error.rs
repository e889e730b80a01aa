// Error handling for the non-auth handlers
// Provides a central error type and its HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::store::StoreError;

/// Main error type for the plan, progress, dashboard and alert handlers.
///
/// Each variant maps to one HTTP status code; internal details are logged
/// and replaced by a generic message before reaching the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Record absent, or present but owned by someone else
    /// Maps to HTTP 404 Not Found
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// Request body failed validation
    /// Maps to HTTP 400 Bad Request
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Store failures
    /// Maps to HTTP 500 Internal Server Error
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// Anything else that should never happen
    /// Maps to HTTP 500 Internal Server Error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// JSON body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,

    /// Machine-readable code (e.g. "NOT_FOUND")
    pub error_code: String,

    /// RFC 3339 timestamp of when the error occurred
    pub timestamp: String,
}

impl ApiError {
    pub fn not_found(resource: &'static str) -> Self {
        ApiError::NotFound { resource }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn to_error_response(&self) -> (StatusCode, ErrorResponse) {
        let (error_code, message) = match self {
            ApiError::NotFound { resource } => {
                debug!("{} not found", resource);
                ("NOT_FOUND", format!("{} not found", resource))
            }
            ApiError::ValidationError(msg) => {
                debug!("Validation error: {}", msg);
                ("VALIDATION_ERROR", msg.clone())
            }
            ApiError::StoreError(err) => {
                error!("Store error: {:?}", err);
                ("DATABASE_ERROR", "A database error occurred".to_string())
            }
            ApiError::InternalError(msg) => {
                error!("Internal error: {}", msg);
                ("INTERNAL_ERROR", "An internal server error occurred".to_string())
            }
        };

        (
            self.status_code(),
            ErrorResponse {
                error: message,
                error_code: error_code.to_string(),
                timestamp: Utc::now().to_rfc3339(),
            },
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = self.to_error_response();
        (status, Json(error_response)).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors.to_string())
    }
}
