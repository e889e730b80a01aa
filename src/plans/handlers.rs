// HTTP handlers for emergency plan endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::plans::models::{CreatePlanRequest, Plan, UpdatePlanRequest};
use crate::AppState;

/// Handler for GET /api/plans
/// Lists the caller's plans, newest first
#[utoipa::path(
    get,
    path = "/api/plans",
    responses(
        (status = 200, description = "The caller's plans", body = Vec<Plan>),
        (status = 401, description = "Missing token", body = String),
        (status = 403, description = "Invalid or expired token", body = String),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "plans"
)]
pub async fn list_plans_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Plan>>, ApiError> {
    let plans = state.plan_service.list_plans(user.user_id).await?;
    Ok(Json(plans))
}

/// Handler for POST /api/plans
/// Creates a plan owned by the caller
#[utoipa::path(
    post,
    path = "/api/plans",
    request_body = CreatePlanRequest,
    responses(
        (status = 201, description = "Plan created", body = Plan),
        (status = 400, description = "Malformed request body", body = String),
        (status = 401, description = "Missing token", body = String),
        (status = 403, description = "Invalid or expired token", body = String),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "plans"
)]
pub async fn create_plan_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(request): JsonBody<CreatePlanRequest>,
) -> Result<(StatusCode, Json<Plan>), ApiError> {
    tracing::debug!("Creating plan '{}' for user {}", request.plan_name, user.user_id);

    let plan = state.plan_service.create_plan(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// Handler for PUT /api/plans/:id
/// Applies a partial update to one of the caller's plans
#[utoipa::path(
    put,
    path = "/api/plans/{id}",
    params(
        ("id" = String, Path, description = "Plan ID")
    ),
    request_body = UpdatePlanRequest,
    responses(
        (status = 200, description = "Plan updated", body = Plan),
        (status = 400, description = "Malformed request body", body = String),
        (status = 401, description = "Missing token", body = String),
        (status = 403, description = "Invalid or expired token", body = String),
        (status = 404, description = "No such plan for this user", body = String, example = json!({"error": "Plan not found"})),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "plans"
)]
pub async fn update_plan_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    JsonBody(changes): JsonBody<UpdatePlanRequest>,
) -> Result<Json<Plan>, ApiError> {
    // An id that cannot name any plan is simply not found
    let plan_id = Uuid::parse_str(&id).map_err(|_| ApiError::not_found("Plan"))?;

    let plan = state
        .plan_service
        .update_plan(plan_id, user.user_id, changes)
        .await?;

    Ok(Json(plan))
}
