// HTTP handlers for alerts

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::alerts::models::Alert;
use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::AppState;

/// Response of POST /api/mock-data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedResponse {
    #[schema(example = "Mock data created successfully")]
    pub message: String,
    pub alerts_created: usize,
}

/// Handler for GET /api/alerts
/// Unexpired alerts for the caller's region, newest first
#[utoipa::path(
    get,
    path = "/api/alerts",
    responses(
        (status = 200, description = "Active alerts for the caller's region", body = Vec<Alert>),
        (status = 401, description = "Missing token", body = String),
        (status = 403, description = "Invalid or expired token", body = String),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "alerts"
)]
pub async fn list_alerts_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Alert>>, ApiError> {
    let alerts = state.alert_service.active_for_user(user.user_id).await?;
    Ok(Json(alerts))
}

/// Handler for POST /api/mock-data
/// Replaces the alert collection with demo alerts
#[utoipa::path(
    post,
    path = "/api/mock-data",
    responses(
        (status = 200, description = "Demo alerts seeded", body = SeedResponse),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "alerts"
)]
pub async fn seed_mock_data_handler(
    State(state): State<AppState>,
) -> Result<Json<SeedResponse>, ApiError> {
    let alerts_created = state.alert_service.seed_demo_alerts().await?;

    Ok(Json(SeedResponse {
        message: "Mock data created successfully".to_string(),
        alerts_created,
    }))
}
