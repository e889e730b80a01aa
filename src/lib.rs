pub mod alerts;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod extract;
pub mod plans;
pub mod progress;
pub mod store;

use std::path::Path;
use std::sync::Arc;

use axum::{
    middleware,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use alerts::{AlertService, SeedResponse};
use auth::{AuthService, PasswordService, TokenService};
use dashboard::{DashboardService, DashboardStats, DashboardResponse};
use plans::PlanService;
use progress::ProgressService;
use store::Store;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::register_handler,
        auth::handlers::login_handler,
        dashboard::handlers::dashboard_handler,
        progress::handlers::update_progress_handler,
        plans::handlers::list_plans_handler,
        plans::handlers::create_plan_handler,
        plans::handlers::update_plan_handler,
        alerts::handlers::list_alerts_handler,
        alerts::handlers::seed_mock_data_handler,
        health_handler,
    ),
    components(
        schemas(
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::AuthResponse,
            auth::UserResponse,
            auth::models::ProgressSummary,
            progress::Progress,
            progress::UpdateProgressRequest,
            plans::Plan,
            plans::EmergencyContact,
            plans::CreatePlanRequest,
            plans::UpdatePlanRequest,
            alerts::Alert,
            alerts::AlertSeverity,
            SeedResponse,
            DashboardStats,
            DashboardResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "dashboard", description = "Per-user preparedness overview"),
        (name = "progress", description = "Training course progress"),
        (name = "plans", description = "Emergency plans"),
        (name = "alerts", description = "Regional disaster alerts"),
        (name = "health", description = "Liveness probe")
    ),
    info(
        title = "Disaster Preparedness API",
        version = "1.0.0",
        description = "Training progress, emergency plans and regional alerts for disaster preparedness"
    )
)]
pub struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub token_service: Arc<TokenService>,
    pub progress_service: Arc<ProgressService>,
    pub plan_service: Arc<PlanService>,
    pub dashboard_service: Arc<DashboardService>,
    pub alert_service: Arc<AlertService>,
}

impl AppState {
    /// Wire every service onto one store
    pub fn new(store: Arc<dyn Store>, tokens: TokenService, passwords: PasswordService) -> Self {
        let tokens = Arc::new(tokens);
        let alerts = AlertService::new(store.clone());

        Self {
            auth_service: Arc::new(AuthService::new(
                store.clone(),
                Arc::new(passwords),
                tokens.clone(),
            )),
            token_service: tokens,
            progress_service: Arc::new(ProgressService::new(store.clone())),
            plan_service: Arc::new(PlanService::new(store.clone())),
            dashboard_service: Arc::new(DashboardService::new(store, alerts.clone())),
            alert_service: Arc::new(alerts),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

/// Handler for GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Build the application router.
///
/// Per-user routes sit behind the bearer-token gate; anything that matches
/// no route is served from `static_dir`.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/api/dashboard", get(dashboard::dashboard_handler))
        .route("/api/progress", post(progress::update_progress_handler))
        .route(
            "/api/plans",
            get(plans::list_plans_handler).post(plans::create_plan_handler),
        )
        .route("/api/plans/:id", put(plans::update_plan_handler))
        .route("/api/alerts", get(alerts::list_alerts_handler))
        .route_layer(middleware::from_fn_with_state(
            state.token_service.clone(),
            auth::require_auth,
        ));

    let public = Router::new()
        .route("/api/register", post(auth::register_handler))
        .route("/api/login", post(auth::login_handler))
        .route("/api/mock-data", post(alerts::seed_mock_data_handler))
        .route("/health", get(health_handler));

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public)
        .merge(protected)
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
