// Document store abstraction
// Users, progress records, plans and alerts live behind one trait so the
// handlers never care whether PostgreSQL or the in-memory store is wired in.

pub mod memory;
pub mod postgres;

use axum::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::alerts::models::{Alert, NewAlert};
use crate::auth::models::{NewUser, User};
use crate::plans::models::{CreatePlanRequest, Plan, UpdatePlanRequest};
use crate::progress::models::{Progress, UpdateProgressRequest};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors raised by a store implementation
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint was violated (e.g. a second user with the same email)
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations needed by the API.
///
/// Every call is an independent round trip. Nothing here is transactional:
/// callers that issue two writes in a row accept that a failure in between
/// leaves the first one in place.
#[async_trait]
pub trait Store: Send + Sync {
    // Users

    /// Exact, case-sensitive email lookup
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Insert a user with a zeroed progress summary.
    /// Fails with `StoreError::Duplicate` when the email is taken.
    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;

    async fn set_training_completed(&self, user_id: Uuid, count: i32) -> StoreResult<()>;

    async fn set_plans_created(&self, user_id: Uuid, count: i32) -> StoreResult<()>;

    // Progress

    /// Insert or replace the record keyed by (user_id, course_id)
    async fn upsert_progress(
        &self,
        user_id: Uuid,
        update: UpdateProgressRequest,
    ) -> StoreResult<Progress>;

    async fn progress_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Progress>>;

    async fn count_completed_progress(&self, user_id: Uuid) -> StoreResult<i64>;

    // Plans

    async fn insert_plan(&self, user_id: Uuid, plan: CreatePlanRequest) -> StoreResult<Plan>;

    /// Plans owned by `user_id`, newest first
    async fn plans_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Plan>>;

    async fn count_plans(&self, user_id: Uuid) -> StoreResult<i64>;

    /// Apply `changes` to the plan matching both `plan_id` and `owner_id`.
    /// Returns `None` when no such plan exists.
    async fn update_plan(
        &self,
        plan_id: Uuid,
        owner_id: Uuid,
        changes: UpdatePlanRequest,
    ) -> StoreResult<Option<Plan>>;

    // Alerts

    /// Alerts for `region` expiring strictly after `now`, newest first
    async fn active_alerts(&self, region: &str, now: DateTime<Utc>) -> StoreResult<Vec<Alert>>;

    /// Drop every alert and insert `alerts` in their place
    async fn replace_alerts(&self, alerts: Vec<NewAlert>) -> StoreResult<Vec<Alert>>;
}
