use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;
use crate::store::{MemoryStore, PgStore, Store, StoreError};

/// Creates and configures a PostgreSQL connection pool
///
/// # Arguments
/// * `database_url` - PostgreSQL connection string
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    tracing::debug!("Creating database connection pool");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await?;

    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}

/// Build the store selected by the configuration.
///
/// PostgreSQL stores are migrated before being returned.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn Store>, StoreError> {
    if config.uses_memory_store() {
        tracing::warn!("Using the in-memory store; data will not survive a restart");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let pool = create_pool(&config.database_url).await?;
    let store = PgStore::new(pool);

    tracing::info!("Running database migrations...");
    store.migrate().await?;
    tracing::info!("Migrations completed successfully");

    Ok(Arc::new(store))
}
