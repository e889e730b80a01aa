use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::alerts::{models::Alert, service::AlertService};
use crate::auth::models::UserResponse;
use crate::dashboard::aggregator::{compute_stats, DashboardStats};
use crate::error::ApiError;
use crate::plans::models::Plan;
use crate::progress::models::Progress;
use crate::store::Store;

/// Everything the dashboard page shows in one payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub user: UserResponse,
    pub stats: DashboardStats,
    pub progress: Vec<Progress>,
    pub plans: Vec<Plan>,
    pub alerts: Vec<Alert>,
}

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn Store>,
    alerts: AlertService,
}

impl DashboardService {
    pub fn new(store: Arc<dyn Store>, alerts: AlertService) -> Self {
        Self { store, alerts }
    }

    pub async fn dashboard(&self, user_id: Uuid) -> Result<DashboardResponse, ApiError> {
        let user = self
            .store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("User"))?;

        let progress = self.store.progress_for_user(user_id).await?;
        let plans = self.store.plans_for_user(user_id).await?;
        let alerts = self.alerts.active_for_region(user.region.as_deref()).await?;

        let stats = compute_stats(user.preparedness_score, &progress, &plans);
        debug!("Dashboard stats for user {}: {:?}", user_id, stats);

        Ok(DashboardResponse {
            user: user.into(),
            stats,
            progress,
            plans,
            alerts,
        })
    }
}
