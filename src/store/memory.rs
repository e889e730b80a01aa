// In-process store
// Backs the test suite and `DATABASE_URL=memory` demo runs. Data is lost on exit.

use axum::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::alerts::models::{Alert, NewAlert};
use crate::auth::models::{NewUser, User};
use crate::plans::models::{CreatePlanRequest, Plan, UpdatePlanRequest};
use crate::progress::models::{Progress, UpdateProgressRequest};
use crate::store::{Store, StoreError, StoreResult};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    progress: Vec<Progress>,
    plans: Vec<Plan>,
    alerts: Vec<Alert>,
}

/// Store implementation holding every collection in memory
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first. Records are scanned latest-inserted first so that
/// identical timestamps still come out newest first after the stable sort.
fn newest_first<T: Clone>(items: &[T], created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut sorted: Vec<T> = items.iter().rev().cloned().collect();
    sorted.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    sorted
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let data = self.data.read().await;
        Ok(data.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let data = self.data.read().await;
        Ok(data.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let mut data = self.data.write().await;
        if data.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate(format!("user with email {}", user.email)));
        }

        let user = User {
            id: Uuid::new_v4(),
            full_name: user.full_name,
            email: user.email,
            password_hash: user.password_hash,
            phone: user.phone,
            region: user.region,
            created_at: Utc::now(),
            training_completed: 0,
            plans_created: 0,
            preparedness_score: 0,
        };
        data.users.push(user.clone());
        Ok(user)
    }

    async fn set_training_completed(&self, user_id: Uuid, count: i32) -> StoreResult<()> {
        let mut data = self.data.write().await;
        if let Some(user) = data.users.iter_mut().find(|u| u.id == user_id) {
            user.training_completed = count;
        }
        Ok(())
    }

    async fn set_plans_created(&self, user_id: Uuid, count: i32) -> StoreResult<()> {
        let mut data = self.data.write().await;
        if let Some(user) = data.users.iter_mut().find(|u| u.id == user_id) {
            user.plans_created = count;
        }
        Ok(())
    }

    async fn upsert_progress(
        &self,
        user_id: Uuid,
        update: UpdateProgressRequest,
    ) -> StoreResult<Progress> {
        let mut data = self.data.write().await;
        let now = Utc::now();

        if let Some(existing) = data
            .progress
            .iter_mut()
            .find(|p| p.user_id == user_id && p.course_id == update.course_id)
        {
            existing.course_name = update.course_name;
            existing.progress = update.progress;
            existing.completed = update.completed;
            existing.last_updated = now;
            return Ok(existing.clone());
        }

        let record = Progress {
            id: Uuid::new_v4(),
            user_id,
            course_id: update.course_id,
            course_name: update.course_name,
            progress: update.progress,
            completed: update.completed,
            last_updated: now,
        };
        data.progress.push(record.clone());
        Ok(record)
    }

    async fn progress_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Progress>> {
        let data = self.data.read().await;
        let owned: Vec<Progress> = data
            .progress
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(&owned, |p| p.last_updated))
    }

    async fn count_completed_progress(&self, user_id: Uuid) -> StoreResult<i64> {
        let data = self.data.read().await;
        Ok(data
            .progress
            .iter()
            .filter(|p| p.user_id == user_id && p.completed)
            .count() as i64)
    }

    async fn insert_plan(&self, user_id: Uuid, plan: CreatePlanRequest) -> StoreResult<Plan> {
        let mut data = self.data.write().await;
        let plan = Plan {
            id: Uuid::new_v4(),
            user_id,
            plan_name: plan.plan_name,
            plan_type: plan.plan_type,
            steps: plan.steps,
            supplies: plan.supplies,
            contacts: plan.contacts,
            completed: false,
            created_at: Utc::now(),
        };
        data.plans.push(plan.clone());
        Ok(plan)
    }

    async fn plans_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Plan>> {
        let data = self.data.read().await;
        let owned: Vec<Plan> = data
            .plans
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(&owned, |p| p.created_at))
    }

    async fn count_plans(&self, user_id: Uuid) -> StoreResult<i64> {
        let data = self.data.read().await;
        Ok(data.plans.iter().filter(|p| p.user_id == user_id).count() as i64)
    }

    async fn update_plan(
        &self,
        plan_id: Uuid,
        owner_id: Uuid,
        changes: UpdatePlanRequest,
    ) -> StoreResult<Option<Plan>> {
        let mut data = self.data.write().await;
        let Some(plan) = data
            .plans
            .iter_mut()
            .find(|p| p.id == plan_id && p.user_id == owner_id)
        else {
            return Ok(None);
        };

        changes.apply_to(plan);
        Ok(Some(plan.clone()))
    }

    async fn active_alerts(&self, region: &str, now: DateTime<Utc>) -> StoreResult<Vec<Alert>> {
        let data = self.data.read().await;
        let visible: Vec<Alert> = data
            .alerts
            .iter()
            .filter(|a| a.is_visible(region, now))
            .cloned()
            .collect();
        Ok(newest_first(&visible, |a| a.created_at))
    }

    async fn replace_alerts(&self, alerts: Vec<NewAlert>) -> StoreResult<Vec<Alert>> {
        let mut data = self.data.write().await;
        let now = Utc::now();

        data.alerts = alerts
            .into_iter()
            .map(|alert| Alert {
                id: Uuid::new_v4(),
                title: alert.title,
                description: alert.description,
                alert_type: alert.alert_type,
                severity: alert.severity,
                region: alert.region,
                created_at: now,
                expires_at: alert.expires_at,
            })
            .collect();

        Ok(data.alerts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::models::AlertSeverity;
    use chrono::Duration;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            full_name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            phone: None,
            region: Some("north".to_string()),
        }
    }

    fn progress_update(course_id: &str, progress: f64, completed: bool) -> UpdateProgressRequest {
        UpdateProgressRequest {
            course_id: course_id.to_string(),
            course_name: format!("Course {}", course_id),
            progress,
            completed,
        }
    }

    #[tokio::test]
    async fn test_insert_user_rejects_duplicate_email() {
        let store = MemoryStore::new();
        store.insert_user(new_user("dup@example.com")).await.unwrap();

        let result = store.insert_user(new_user("dup@example.com")).await;
        assert!(matches!(result, Err(StoreError::Duplicate(_))));

        // Case-sensitive: a differently-cased email is a different user
        assert!(store.insert_user(new_user("Dup@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_upsert_progress_replaces_existing_record() {
        let store = MemoryStore::new();
        let user = store.insert_user(new_user("p@example.com")).await.unwrap();

        let first = store
            .upsert_progress(user.id, progress_update("fire", 20.0, false))
            .await
            .unwrap();
        let second = store
            .upsert_progress(user.id, progress_update("fire", 100.0, true))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        let records = store.progress_for_user(user.id).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].progress, 100.0);
        assert!(records[0].completed);
        assert_eq!(store.count_completed_progress(user.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_plan_requires_owner() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let plan = store
            .insert_plan(
                owner,
                CreatePlanRequest {
                    plan_name: "Flood".to_string(),
                    plan_type: "shelter".to_string(),
                    steps: vec![],
                    supplies: vec![],
                    contacts: vec![],
                },
            )
            .await
            .unwrap();

        let changes = UpdatePlanRequest {
            plan_name: Some("Hijacked".to_string()),
            ..Default::default()
        };
        let result = store.update_plan(plan.id, stranger, changes).await.unwrap();
        assert!(result.is_none());

        let plans = store.plans_for_user(owner).await.unwrap();
        assert_eq!(plans[0].plan_name, "Flood");
    }

    #[tokio::test]
    async fn test_plans_listed_newest_first() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        for name in ["first", "second", "third"] {
            store
                .insert_plan(
                    owner,
                    CreatePlanRequest {
                        plan_name: name.to_string(),
                        plan_type: "general".to_string(),
                        steps: vec![],
                        supplies: vec![],
                        contacts: vec![],
                    },
                )
                .await
                .unwrap();
        }

        let names: Vec<String> = store
            .plans_for_user(owner)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.plan_name)
            .collect();
        assert_eq!(names, vec!["third", "second", "first"]);
        assert_eq!(store.count_plans(owner).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_active_alerts_filters_region_and_expiry() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let alert = |region: &str, expires_at| NewAlert {
            title: format!("{} alert", region),
            description: "test".to_string(),
            alert_type: "storm".to_string(),
            severity: AlertSeverity::Moderate,
            region: region.to_string(),
            expires_at,
        };

        store
            .replace_alerts(vec![
                alert("north", now + Duration::days(1)),
                alert("north", now - Duration::days(1)),
                alert("south", now + Duration::days(1)),
            ])
            .await
            .unwrap();

        let visible = store.active_alerts("north", now).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].region, "north");
        assert!(visible[0].expires_at > now);
    }
}
