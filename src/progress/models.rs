use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One user's progress through one training course.
/// At most one record exists per (user_id, course_id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "first-aid")]
    pub course_id: String,
    #[schema(example = "First Aid Basics")]
    pub course_name: String,
    /// Percentage, 0-100 by convention (not enforced)
    #[schema(example = 75.0)]
    pub progress: f64,
    pub completed: bool,
    pub last_updated: DateTime<Utc>,
}

/// Body of POST /api/progress
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressRequest {
    #[schema(example = "first-aid")]
    pub course_id: String,
    #[schema(example = "First Aid Basics")]
    pub course_name: String,
    #[schema(example = 75.0)]
    pub progress: f64,
    #[serde(default)]
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_progress_request_defaults_completed() {
        let request: UpdateProgressRequest = serde_json::from_str(
            r#"{"courseId": "flood-101", "courseName": "Flood Safety", "progress": 40}"#,
        )
        .unwrap();

        assert_eq!(request.course_id, "flood-101");
        assert_eq!(request.progress, 40.0);
        assert!(!request.completed);
    }

    #[test]
    fn test_progress_accepts_out_of_range_values() {
        // Values outside 0-100 pass through untouched
        let request: UpdateProgressRequest = serde_json::from_str(
            r#"{"courseId": "x", "courseName": "X", "progress": 140, "completed": true}"#,
        )
        .unwrap();
        assert_eq!(request.progress, 140.0);
    }
}
