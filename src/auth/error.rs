// Authentication and authorization error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::store::StoreError;

/// Authentication and authorization error types
#[derive(Debug, Error)]
pub enum AuthError {
    // Registration / login
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User already exists")]
    EmailAlreadyExists,

    // Bearer token outcomes. The gate reports `MissingToken` on its own and
    // collapses the other two into one "Invalid token" response.
    #[error("Access token required")]
    MissingToken,
    #[error("Malformed token or bad signature")]
    InvalidToken,
    #[error("Token has expired")]
    ExpiredToken,

    // Server-side failures
    #[error("Password hashing error: {0}")]
    PasswordHashError(String),
    #[error("Token generation error: {0}")]
    TokenGenerationError(String),
    #[error("Store error: {0}")]
    StoreError(StoreError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(_) => AuthError::EmailAlreadyExists,
            other => AuthError::StoreError(other),
        }
    }
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AuthError::ValidationError(errors.to_string())
    }
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AuthError::EmailAlreadyExists => StatusCode::BAD_REQUEST,
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::FORBIDDEN,
            AuthError::ExpiredToken => StatusCode::FORBIDDEN,
            AuthError::PasswordHashError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::TokenGenerationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to send to clients (no sensitive data)
    pub fn error_message(&self) -> String {
        match self {
            AuthError::ValidationError(msg) => msg.clone(),
            AuthError::InvalidCredentials => "Invalid credentials".to_string(),
            AuthError::EmailAlreadyExists => "User already exists".to_string(),
            AuthError::MissingToken => "Access token required".to_string(),
            AuthError::InvalidToken | AuthError::ExpiredToken => "Invalid token".to_string(),
            AuthError::PasswordHashError(_)
            | AuthError::TokenGenerationError(_)
            | AuthError::StoreError(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::InvalidCredentials => warn!("Failed login attempt"),
            AuthError::EmailAlreadyExists => warn!("Registration with an existing email"),
            AuthError::MissingToken => warn!("Missing token in request"),
            AuthError::InvalidToken => warn!("Invalid token attempt"),
            AuthError::ExpiredToken => warn!("Expired token attempt"),
            AuthError::PasswordHashError(msg) => error!("Password hashing error: {}", msg),
            AuthError::TokenGenerationError(msg) => error!("Token generation error: {}", msg),
            AuthError::StoreError(err) => error!("Store error in auth: {}", err),
            AuthError::ValidationError(_) => {}
        }

        let body = Json(json!({
            "error": self.error_message(),
        }));

        (self.status_code(), body).into_response()
    }
}
