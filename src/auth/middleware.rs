// Authentication gate for protected routes

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::{error::AuthError, token::TokenService};

/// Identity attached to a request once the gate has verified its token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Extract and verify the bearer token carried in `headers`.
///
/// A missing header (or `Bearer` with nothing after it) is `MissingToken`.
/// Any other scheme, or a token the verifier rejects, is an invalid token.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<AuthenticatedUser, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    let token = auth_header
        .strip_prefix("Bearer")
        .ok_or(AuthError::InvalidToken)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    let claims = tokens.verify(token)?;

    Ok(AuthenticatedUser {
        user_id: claims.user_id,
        email: claims.email,
    })
}

/// Middleware guarding protected routes.
///
/// Runs before any handler; on success the decoded identity is stored in the
/// request extensions for the `AuthenticatedUser` extractor.
pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let endpoint = request.uri().path().to_string();

    let user = authenticate(request.headers(), &tokens).map_err(|e| {
        warn!("Rejected request to protected endpoint {}: {}", endpoint, e);
        e
    })?;

    debug!("Authenticated user_id={} for {}", user.user_id, endpoint);
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only the gate puts an identity here; a route mounted outside it
        // therefore behaves as if no token was sent.
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}
