use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::plans::models::{CreatePlanRequest, Plan, UpdatePlanRequest};
use crate::store::Store;

/// Service layer for emergency plans.
/// Every operation is scoped to the requesting owner.
#[derive(Clone)]
pub struct PlanService {
    store: Arc<dyn Store>,
}

impl PlanService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create a plan for `owner_id`.
    ///
    /// The owner's `plans_created` is then recounted from the store rather
    /// than incremented, so a failure between the two writes is repaired by
    /// the next create.
    pub async fn create_plan(
        &self,
        owner_id: Uuid,
        request: CreatePlanRequest,
    ) -> Result<Plan, ApiError> {
        let plan = self.store.insert_plan(owner_id, request).await?;

        let total = self.store.count_plans(owner_id).await?;
        self.store.set_plans_created(owner_id, total as i32).await?;

        info!("Created plan {} for user {}", plan.id, owner_id);
        Ok(plan)
    }

    /// The owner's plans, newest first
    pub async fn list_plans(&self, owner_id: Uuid) -> Result<Vec<Plan>, ApiError> {
        let plans = self.store.plans_for_user(owner_id).await?;
        debug!("Retrieved {} plans for user {}", plans.len(), owner_id);
        Ok(plans)
    }

    /// Apply a partial update to one of the owner's plans.
    ///
    /// Someone else's plan and a nonexistent plan are both `NotFound`.
    pub async fn update_plan(
        &self,
        plan_id: Uuid,
        owner_id: Uuid,
        changes: UpdatePlanRequest,
    ) -> Result<Plan, ApiError> {
        let plan = self
            .store
            .update_plan(plan_id, owner_id, changes)
            .await?
            .ok_or_else(|| ApiError::not_found("Plan"))?;

        info!("Updated plan {} for user {}", plan.id, owner_id);
        Ok(plan)
    }
}
