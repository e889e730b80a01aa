use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::alerts::{
    models::Alert,
    seed::demo_alerts,
};
use crate::error::ApiError;
use crate::store::Store;

/// Region-scoped alert lookups and demo seeding
#[derive(Clone)]
pub struct AlertService {
    store: Arc<dyn Store>,
}

impl AlertService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Unexpired alerts for `region`, newest first.
    /// A user without a region sees nothing.
    pub async fn active_for_region(&self, region: Option<&str>) -> Result<Vec<Alert>, ApiError> {
        let Some(region) = region else {
            return Ok(Vec::new());
        };

        let alerts = self.store.active_alerts(region, Utc::now()).await?;
        debug!("{} active alerts for region {}", alerts.len(), region);
        Ok(alerts)
    }

    /// Unexpired alerts for the region of `user_id`
    pub async fn active_for_user(&self, user_id: Uuid) -> Result<Vec<Alert>, ApiError> {
        let user = self
            .store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("User"))?;

        self.active_for_region(user.region.as_deref()).await
    }

    /// Replace every alert with the demo set; returns how many were created
    pub async fn seed_demo_alerts(&self) -> Result<usize, ApiError> {
        let created = self.store.replace_alerts(demo_alerts(Utc::now())).await?;
        info!("Seeded {} demo alerts", created.len());
        Ok(created.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::models::{AlertSeverity, NewAlert};
    use crate::auth::models::NewUser;
    use crate::store::MemoryStore;
    use chrono::Duration;

    fn new_alert(region: &str, expires_in: Duration) -> NewAlert {
        NewAlert {
            title: format!("{} alert", region),
            description: "test".to_string(),
            alert_type: "flood".to_string(),
            severity: AlertSeverity::High,
            region: region.to_string(),
            expires_at: Utc::now() + expires_in,
        }
    }

    #[tokio::test]
    async fn test_expired_alerts_are_excluded_even_in_region() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        store
            .replace_alerts(vec![
                new_alert("north", Duration::hours(6)),
                new_alert("north", -Duration::hours(6)),
            ])
            .await
            .unwrap();

        let service = AlertService::new(store);
        let alerts = service.active_for_region(Some("north")).await.unwrap();

        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].expires_at > Utc::now());
    }

    #[tokio::test]
    async fn test_user_without_region_sees_nothing() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        store
            .replace_alerts(vec![new_alert("north", Duration::hours(6))])
            .await
            .unwrap();
        let user = store
            .insert_user(NewUser {
                full_name: "Nomad".to_string(),
                email: "nomad@example.com".to_string(),
                password_hash: "hash".to_string(),
                phone: None,
                region: None,
            })
            .await
            .unwrap();

        let service = AlertService::new(store);
        assert!(service.active_for_user(user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let service = AlertService::new(Arc::new(MemoryStore::new()));
        let result = service.active_for_user(Uuid::new_v4()).await;
        assert!(matches!(result, Err(ApiError::NotFound { resource: "User" })));
    }

    #[tokio::test]
    async fn test_seeding_replaces_existing_alerts() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        store
            .replace_alerts(vec![new_alert("atlantis", Duration::days(30))])
            .await
            .unwrap();

        let service = AlertService::new(store);
        let created = service.seed_demo_alerts().await.unwrap();

        assert_eq!(created, demo_alerts(Utc::now()).len());
        assert!(service.active_for_region(Some("atlantis")).await.unwrap().is_empty());
        assert!(!service.active_for_region(Some("north")).await.unwrap().is_empty());
    }
}
