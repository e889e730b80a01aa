use tracing_subscriber::EnvFilter;

use disaster_preparedness_api::{
    auth::{PasswordService, TokenService},
    config::Config,
    create_router, db, AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // RUST_LOG overrides the default filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("disaster_preparedness_api=debug,tower_http=info")
            }),
        )
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Disaster Preparedness API - Starting...");

    let config = Config::from_env()?;
    if config.uses_default_secret() {
        tracing::warn!("JWT_SECRET is not set; using the built-in development secret");
    }

    tracing::info!("Connecting to data store...");
    let store = db::connect_store(&config).await?;

    let passwords =
        PasswordService::with_memory_cost(config.password_hash_memory_kib, config.password_hash_cost)?;
    let tokens = TokenService::new(&config.jwt_secret);

    let state = AppState::new(store, tokens, passwords);
    let app = create_router(state, &config.static_dir);

    let addr = config.bind_address();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Disaster Preparedness API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
