// PostgreSQL-backed store

use axum::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use crate::alerts::models::{Alert, NewAlert};
use crate::auth::models::{NewUser, User};
use crate::plans::models::{CreatePlanRequest, EmergencyContact, Plan, UpdatePlanRequest};
use crate::progress::models::{Progress, UpdateProgressRequest};
use crate::store::{Store, StoreError, StoreResult};

const USER_COLUMNS: &str = "id, full_name, email, password_hash, phone, region, created_at, \
     training_completed, plans_created, preparedness_score";

const PROGRESS_COLUMNS: &str =
    "id, user_id, course_id, course_name, progress, completed, last_updated";

const PLAN_COLUMNS: &str =
    "id, user_id, plan_name, plan_type, steps, supplies, contacts, completed, created_at";

const ALERT_COLUMNS: &str =
    "id, title, description, alert_type, severity, region, created_at, expires_at";

/// Plan row as stored; list fields are JSONB columns
#[derive(Debug, FromRow)]
struct PlanRow {
    id: Uuid,
    user_id: Uuid,
    plan_name: String,
    plan_type: String,
    steps: Json<Vec<String>>,
    supplies: Json<Vec<String>>,
    contacts: Json<Vec<EmergencyContact>>,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl From<PlanRow> for Plan {
    fn from(row: PlanRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            plan_name: row.plan_name,
            plan_type: row.plan_type,
            steps: row.steps.0,
            supplies: row.supplies.0,
            contacts: row.contacts.0,
            completed: row.completed,
            created_at: row.created_at,
        }
    }
}

/// Store implementation on top of a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the embedded migrations
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let email = user.email.clone();
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, full_name, email, password_hash, phone, region) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(user.full_name)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.phone)
        .bind(user.region)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return StoreError::Duplicate(format!("user with email {}", email));
                }
            }
            StoreError::Database(e)
        })
    }

    async fn set_training_completed(&self, user_id: Uuid, count: i32) -> StoreResult<()> {
        sqlx::query("UPDATE users SET training_completed = $1 WHERE id = $2")
            .bind(count)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn set_plans_created(&self, user_id: Uuid, count: i32) -> StoreResult<()> {
        sqlx::query("UPDATE users SET plans_created = $1 WHERE id = $2")
            .bind(count)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn upsert_progress(
        &self,
        user_id: Uuid,
        update: UpdateProgressRequest,
    ) -> StoreResult<Progress> {
        let progress = sqlx::query_as::<_, Progress>(&format!(
            r#"
            INSERT INTO progress (id, user_id, course_id, course_name, progress, completed, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            ON CONFLICT (user_id, course_id) DO UPDATE
            SET course_name = EXCLUDED.course_name,
                progress = EXCLUDED.progress,
                completed = EXCLUDED.completed,
                last_updated = EXCLUDED.last_updated
            RETURNING {PROGRESS_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(update.course_id)
        .bind(update.course_name)
        .bind(update.progress)
        .bind(update.completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(progress)
    }

    async fn progress_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Progress>> {
        let records = sqlx::query_as::<_, Progress>(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM progress WHERE user_id = $1 ORDER BY last_updated DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn count_completed_progress(&self, user_id: Uuid) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM progress WHERE user_id = $1 AND completed",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn insert_plan(&self, user_id: Uuid, plan: CreatePlanRequest) -> StoreResult<Plan> {
        let row = sqlx::query_as::<_, PlanRow>(&format!(
            r#"
            INSERT INTO plans (id, user_id, plan_name, plan_type, steps, supplies, contacts)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PLAN_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(plan.plan_name)
        .bind(plan.plan_type)
        .bind(Json(plan.steps))
        .bind(Json(plan.supplies))
        .bind(Json(plan.contacts))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn plans_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Plan>> {
        let rows = sqlx::query_as::<_, PlanRow>(&format!(
            "SELECT {PLAN_COLUMNS} FROM plans WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Plan::from).collect())
    }

    async fn count_plans(&self, user_id: Uuid) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM plans WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn update_plan(
        &self,
        plan_id: Uuid,
        owner_id: Uuid,
        changes: UpdatePlanRequest,
    ) -> StoreResult<Option<Plan>> {
        // Omitted fields bind as NULL and COALESCE keeps the stored value
        let row = sqlx::query_as::<_, PlanRow>(&format!(
            r#"
            UPDATE plans
            SET plan_name = COALESCE($3, plan_name),
                plan_type = COALESCE($4, plan_type),
                steps = COALESCE($5, steps),
                supplies = COALESCE($6, supplies),
                contacts = COALESCE($7, contacts),
                completed = COALESCE($8, completed)
            WHERE id = $1 AND user_id = $2
            RETURNING {PLAN_COLUMNS}
            "#
        ))
        .bind(plan_id)
        .bind(owner_id)
        .bind(changes.plan_name)
        .bind(changes.plan_type)
        .bind(changes.steps.map(Json))
        .bind(changes.supplies.map(Json))
        .bind(changes.contacts.map(Json))
        .bind(changes.completed)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Plan::from))
    }

    async fn active_alerts(&self, region: &str, now: DateTime<Utc>) -> StoreResult<Vec<Alert>> {
        let alerts = sqlx::query_as::<_, Alert>(&format!(
            "SELECT {ALERT_COLUMNS} FROM alerts \
             WHERE region = $1 AND expires_at > $2 ORDER BY created_at DESC"
        ))
        .bind(region)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(alerts)
    }

    async fn replace_alerts(&self, alerts: Vec<NewAlert>) -> StoreResult<Vec<Alert>> {
        sqlx::query("DELETE FROM alerts").execute(&self.pool).await?;

        let mut inserted = Vec::with_capacity(alerts.len());
        for alert in alerts {
            let row = sqlx::query_as::<_, Alert>(&format!(
                r#"
                INSERT INTO alerts (id, title, description, alert_type, severity, region, expires_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING {ALERT_COLUMNS}
                "#
            ))
            .bind(Uuid::new_v4())
            .bind(alert.title)
            .bind(alert.description)
            .bind(alert.alert_type)
            .bind(alert.severity)
            .bind(alert.region)
            .bind(alert.expires_at)
            .fetch_one(&self.pool)
            .await?;
            inserted.push(row);
        }

        Ok(inserted)
    }
}

// These run against a real database:
//   DATABASE_URL=postgresql://... cargo test -- --ignored
#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::models::AlertSeverity;
    use chrono::Duration;

    async fn create_test_store() -> PgStore {
        let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            "postgresql://localhost:5432/disaster_preparedness".to_string()
        });

        let pool = crate::db::create_pool(&database_url)
            .await
            .expect("Failed to connect to test database");
        let store = PgStore::new(pool);
        store.migrate().await.expect("Failed to run migrations");
        store
    }

    /// Insert a user under a unique email so tests can share one database
    async fn create_test_user(store: &PgStore, region: Option<&str>) -> User {
        store
            .insert_user(NewUser {
                full_name: "Pg User".to_string(),
                email: format!("{}@example.com", Uuid::new_v4()),
                password_hash: "hash".to_string(),
                phone: None,
                region: region.map(str::to_string),
            })
            .await
            .unwrap()
    }

    fn progress_update(course_id: &str, progress: f64, completed: bool) -> UpdateProgressRequest {
        UpdateProgressRequest {
            course_id: course_id.to_string(),
            course_name: format!("Course {}", course_id),
            progress,
            completed,
        }
    }

    fn plan_request(name: &str) -> CreatePlanRequest {
        CreatePlanRequest {
            plan_name: name.to_string(),
            plan_type: "evacuation".to_string(),
            steps: vec!["Grab go-bag".to_string(), "Drive north".to_string()],
            supplies: vec!["Water".to_string()],
            contacts: vec![EmergencyContact {
                name: "Sam".to_string(),
                phone: "555-0142".to_string(),
                relationship: "sibling".to_string(),
            }],
        }
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL at DATABASE_URL"]
    async fn test_duplicate_email_maps_to_duplicate() {
        let store = create_test_store().await;
        let user = create_test_user(&store, None).await;

        let result = store
            .insert_user(NewUser {
                full_name: "Second".to_string(),
                email: user.email.clone(),
                password_hash: "other".to_string(),
                phone: None,
                region: None,
            })
            .await;

        assert!(matches!(result, Err(StoreError::Duplicate(_))));
        let stored = store.find_user_by_email(&user.email).await.unwrap().unwrap();
        assert_eq!(stored.id, user.id);
        assert_eq!(stored.training_completed, 0);
        assert_eq!(stored.plans_created, 0);
        assert_eq!(stored.preparedness_score, 0);
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL at DATABASE_URL"]
    async fn test_progress_upsert_replaces_existing_record() {
        let store = create_test_store().await;
        let user = create_test_user(&store, None).await;

        let first = store
            .upsert_progress(user.id, progress_update("fire", 40.0, false))
            .await
            .unwrap();
        let second = store
            .upsert_progress(user.id, progress_update("fire", 100.0, true))
            .await
            .unwrap();
        store
            .upsert_progress(user.id, progress_update("flood", 10.0, false))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.progress, 100.0);
        assert!(second.completed);
        assert_eq!(store.progress_for_user(user.id).await.unwrap().len(), 2);
        assert_eq!(store.count_completed_progress(user.id).await.unwrap(), 1);

        store.set_training_completed(user.id, 1).await.unwrap();
        let stored = store.find_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.training_completed, 1);
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL at DATABASE_URL"]
    async fn test_plan_lists_round_trip_through_jsonb() {
        let store = create_test_store().await;
        let user = create_test_user(&store, None).await;

        let created = store.insert_plan(user.id, plan_request("Home")).await.unwrap();
        store.insert_plan(user.id, plan_request("Work")).await.unwrap();

        let plans = store.plans_for_user(user.id).await.unwrap();
        let names: Vec<&str> = plans.iter().map(|p| p.plan_name.as_str()).collect();
        assert_eq!(names, vec!["Work", "Home"]);
        assert_eq!(store.count_plans(user.id).await.unwrap(), 2);

        let home = plans.iter().find(|p| p.id == created.id).unwrap();
        assert_eq!(home.steps, vec!["Grab go-bag", "Drive north"]);
        assert_eq!(home.supplies, vec!["Water"]);
        assert_eq!(home.contacts, plan_request("Home").contacts);
        assert!(!home.completed);
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL at DATABASE_URL"]
    async fn test_plan_update_is_partial_and_owner_scoped() {
        let store = create_test_store().await;
        let owner = create_test_user(&store, None).await;
        let intruder = create_test_user(&store, None).await;
        let plan = store.insert_plan(owner.id, plan_request("Quake")).await.unwrap();

        let hijack = store
            .update_plan(
                plan.id,
                intruder.id,
                UpdatePlanRequest {
                    plan_name: Some("Hijacked".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(hijack.is_none());

        let missing = store
            .update_plan(Uuid::new_v4(), owner.id, UpdatePlanRequest::default())
            .await
            .unwrap();
        assert!(missing.is_none());

        let updated = store
            .update_plan(
                plan.id,
                owner.id,
                UpdatePlanRequest {
                    completed: Some(true),
                    supplies: Some(vec!["Radio".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert!(updated.completed);
        assert_eq!(updated.plan_name, "Quake");
        assert_eq!(updated.steps, plan.steps);
        assert_eq!(updated.supplies, vec!["Radio"]);
        assert_eq!(updated.contacts, plan.contacts);
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL at DATABASE_URL"]
    async fn test_alerts_filter_by_region_and_expiry() {
        let store = create_test_store().await;
        let region = format!("region-{}", Uuid::new_v4());
        let now = Utc::now();

        let alert = |title: &str, region: &str, severity: AlertSeverity, expires_in: Duration| {
            NewAlert {
                title: title.to_string(),
                description: "desc".to_string(),
                alert_type: "storm".to_string(),
                severity,
                region: region.to_string(),
                expires_at: now + expires_in,
            }
        };

        let inserted = store
            .replace_alerts(vec![
                alert("Expired", &region, AlertSeverity::Low, Duration::hours(-1)),
                alert("Older", &region, AlertSeverity::Moderate, Duration::hours(4)),
                alert("Elsewhere", "elsewhere", AlertSeverity::High, Duration::hours(4)),
                alert("Newer", &region, AlertSeverity::Severe, Duration::hours(4)),
            ])
            .await
            .unwrap();
        assert_eq!(inserted.len(), 4);

        let active = store.active_alerts(&region, Utc::now()).await.unwrap();
        let titles: Vec<&str> = active.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Newer", "Older"]);
        assert_eq!(active[0].severity, AlertSeverity::Severe);
        assert_eq!(active[1].severity, AlertSeverity::Moderate);
    }
}
