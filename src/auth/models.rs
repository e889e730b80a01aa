// Authentication data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User database model
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub region: Option<String>,
    pub created_at: DateTime<Utc>,
    pub training_completed: i32,
    pub plans_created: i32,
    pub preparedness_score: i32,
}

impl User {
    pub fn progress_summary(&self) -> ProgressSummary {
        ProgressSummary {
            training_completed: self.training_completed,
            plans_created: self.plans_created,
            preparedness_score: self.preparedness_score,
        }
    }
}

/// Data needed to insert a user; the summary always starts at zero
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub region: Option<String>,
}

/// Progress summary embedded in every user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    #[schema(example = 2)]
    pub training_completed: i32,
    #[schema(example = 1)]
    pub plans_created: i32,
    #[schema(example = 0)]
    pub preparedness_score: i32,
}

/// User response model (excludes password_hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    #[schema(example = "Ada Lovelace")]
    pub full_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub phone: Option<String>,
    #[schema(example = "north")]
    pub region: Option<String>,
    pub created_at: DateTime<Utc>,
    pub progress: ProgressSummary,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let progress = user.progress_summary();
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            region: user.region,
            created_at: user.created_at,
            progress,
        }
    }
}

/// Registration request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Full name is required"))]
    #[schema(example = "Ada Lovelace")]
    pub full_name: String,
    #[validate(email(message = "A valid email is required"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "correct horse battery staple")]
    pub password: String,
    pub phone: Option<String>,
    #[schema(example = "north")]
    pub region: Option<String>,
}

/// Login request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

/// Authentication response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            phone: Some("555-0100".to_string()),
            region: Some("north".to_string()),
            created_at: Utc::now(),
            training_completed: 3,
            plans_created: 2,
            preparedness_score: 0,
        }
    }

    #[test]
    fn test_user_response_hides_password_hash() {
        let response = UserResponse::from(sample_user());
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"fullName\":\"Ada Lovelace\""));
        assert!(json.contains("\"trainingCompleted\":3"));
        assert!(json.contains("\"plansCreated\":2"));
    }

    #[test]
    fn test_register_request_validation() {
        let valid: RegisterRequest = serde_json::from_str(
            r#"{"fullName": "Ada", "email": "ada@example.com", "password": "pw"}"#,
        )
        .unwrap();
        assert!(valid.validate().is_ok());
        assert_eq!(valid.phone, None);
        assert_eq!(valid.region, None);

        let bad_email: RegisterRequest = serde_json::from_str(
            r#"{"fullName": "Ada", "email": "not-an-email", "password": "pw"}"#,
        )
        .unwrap();
        assert!(bad_email.validate().is_err());

        let empty_password: RegisterRequest = serde_json::from_str(
            r#"{"fullName": "Ada", "email": "ada@example.com", "password": ""}"#,
        )
        .unwrap();
        assert!(empty_password.validate().is_err());
    }
}
