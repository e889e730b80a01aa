use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// How serious an alert is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Moderate,
    High,
    Severe,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Low => "low",
            AlertSeverity::Moderate => "moderate",
            AlertSeverity::High => "high",
            AlertSeverity::Severe => "severe",
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Region-scoped broadcast. Visible to users of `region` until `expires_at`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: Uuid,
    #[schema(example = "Flash flood warning")]
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    #[schema(example = "flood")]
    pub alert_type: String,
    pub severity: AlertSeverity,
    #[schema(example = "north")]
    pub region: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Alert {
    /// Whether a user in `region` should see this alert at `now`
    pub fn is_visible(&self, region: &str, now: DateTime<Utc>) -> bool {
        self.region == region && self.expires_at > now
    }
}

/// Alert to be inserted; id and created_at are assigned by the store
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub title: String,
    pub description: String,
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub region: String,
    pub expires_at: DateTime<Utc>,
}
