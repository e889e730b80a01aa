// HTTP handler for training progress

use axum::{extract::State, Json};

use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::progress::models::{Progress, UpdateProgressRequest};
use crate::AppState;

/// Handler for POST /api/progress
/// Creates or replaces the caller's progress for one course
#[utoipa::path(
    post,
    path = "/api/progress",
    request_body = UpdateProgressRequest,
    responses(
        (status = 200, description = "Progress recorded", body = Progress),
        (status = 400, description = "Malformed request body", body = String),
        (status = 401, description = "Missing token", body = String, example = json!({"error": "Access token required"})),
        (status = 403, description = "Invalid or expired token", body = String, example = json!({"error": "Invalid token"})),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "progress"
)]
pub async fn update_progress_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(request): JsonBody<UpdateProgressRequest>,
) -> Result<Json<Progress>, ApiError> {
    tracing::debug!("Updating progress for user {} on {}", user.user_id, request.course_id);

    let progress = state
        .progress_service
        .record_progress(user.user_id, request)
        .await?;

    Ok(Json(progress))
}
