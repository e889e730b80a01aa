use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::progress::models::{Progress, UpdateProgressRequest};
use crate::store::Store;

/// Records training progress and keeps the owner's summary current
#[derive(Clone)]
pub struct ProgressService {
    store: Arc<dyn Store>,
}

impl ProgressService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create or replace the caller's record for `request.course_id`.
    ///
    /// Afterwards the owner's `training_completed` is recounted from their
    /// completed records. The two writes are independent.
    pub async fn record_progress(
        &self,
        user_id: Uuid,
        request: UpdateProgressRequest,
    ) -> Result<Progress, ApiError> {
        let progress = self.store.upsert_progress(user_id, request).await?;

        let completed = self.store.count_completed_progress(user_id).await?;
        self.store
            .set_training_completed(user_id, completed as i32)
            .await?;

        info!(
            "Progress for user {} on course {}: {}% (completed: {})",
            user_id, progress.course_id, progress.progress, progress.completed
        );
        Ok(progress)
    }
}
