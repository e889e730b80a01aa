use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Someone to call during an emergency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmergencyContact {
    #[schema(example = "Grace Hopper")]
    pub name: String,
    #[schema(example = "555-0199")]
    pub phone: String,
    #[schema(example = "neighbour")]
    pub relationship: String,
}

/// An emergency plan owned by exactly one user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "Home evacuation")]
    pub plan_name: String,
    #[schema(example = "evacuation")]
    pub plan_type: String,
    pub steps: Vec<String>,
    pub supplies: Vec<String>,
    pub contacts: Vec<EmergencyContact>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Body of POST /api/plans
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanRequest {
    #[schema(example = "Home evacuation")]
    pub plan_name: String,
    #[schema(example = "evacuation")]
    pub plan_type: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub supplies: Vec<String>,
    #[serde(default)]
    pub contacts: Vec<EmergencyContact>,
}

/// Body of PUT /api/plans/:id
/// Every field is optional; omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanRequest {
    pub plan_name: Option<String>,
    pub plan_type: Option<String>,
    pub steps: Option<Vec<String>>,
    pub supplies: Option<Vec<String>>,
    pub contacts: Option<Vec<EmergencyContact>>,
    pub completed: Option<bool>,
}

impl UpdatePlanRequest {
    /// Apply the provided fields to `plan` in place
    pub fn apply_to(self, plan: &mut Plan) {
        if let Some(plan_name) = self.plan_name {
            plan.plan_name = plan_name;
        }
        if let Some(plan_type) = self.plan_type {
            plan.plan_type = plan_type;
        }
        if let Some(steps) = self.steps {
            plan.steps = steps;
        }
        if let Some(supplies) = self.supplies {
            plan.supplies = supplies;
        }
        if let Some(contacts) = self.contacts {
            plan.contacts = contacts;
        }
        if let Some(completed) = self.completed {
            plan.completed = completed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> Plan {
        Plan {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_name: "Wildfire".to_string(),
            plan_type: "evacuation".to_string(),
            steps: vec!["Pack car".to_string(), "Leave early".to_string()],
            supplies: vec!["Water".to_string()],
            contacts: vec![],
            completed: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_plan_request_lists_default_to_empty() {
        let request: CreatePlanRequest =
            serde_json::from_str(r#"{"planName": "Quake", "planType": "shelter"}"#).unwrap();

        assert_eq!(request.plan_name, "Quake");
        assert!(request.steps.is_empty());
        assert!(request.supplies.is_empty());
        assert!(request.contacts.is_empty());
    }

    #[test]
    fn test_partial_update_keeps_omitted_fields() {
        let mut plan = sample_plan();
        let changes: UpdatePlanRequest =
            serde_json::from_str(r#"{"planName": "Wildfire v2"}"#).unwrap();

        changes.apply_to(&mut plan);

        assert_eq!(plan.plan_name, "Wildfire v2");
        assert_eq!(plan.plan_type, "evacuation");
        assert_eq!(plan.steps.len(), 2);
        assert!(!plan.completed);
    }

    #[test]
    fn test_update_applies_completed_like_any_field() {
        let mut plan = sample_plan();
        let changes = UpdatePlanRequest {
            completed: Some(true),
            supplies: Some(vec!["Radio".to_string()]),
            ..Default::default()
        };

        changes.apply_to(&mut plan);

        assert!(plan.completed);
        assert_eq!(plan.supplies, vec!["Radio".to_string()]);
    }

    #[test]
    fn test_plan_serializes_camel_case() {
        let json = serde_json::to_value(sample_plan()).unwrap();
        assert!(json.get("planName").is_some());
        assert!(json.get("userId").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
