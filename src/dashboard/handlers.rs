use axum::{extract::State, Json};

use crate::auth::AuthenticatedUser;
use crate::dashboard::service::DashboardResponse;
use crate::error::ApiError;
use crate::AppState;

/// Handler for GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "User, statistics, progress, plans and alerts", body = DashboardResponse),
        (status = 401, description = "Missing token", body = String),
        (status = 403, description = "Invalid or expired token", body = String),
        (status = 404, description = "User no longer exists", body = String),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "dashboard"
)]
pub async fn dashboard_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<DashboardResponse>, ApiError> {
    let dashboard = state.dashboard_service.dashboard(user.user_id).await?;
    Ok(Json(dashboard))
}
