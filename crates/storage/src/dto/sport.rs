use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::common::validate_name;

/// Request payload for creating a new sport
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSportRequest {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
}

/// Request payload for updating an existing sport
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSportRequest {
    #[validate(custom(function = "validate_name"))]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SportResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: NaiveDateTime,
}

impl From<crate::models::Sport> for SportResponse {
    fn from(sport: crate::models::Sport) -> Self {
        Self {
            id: sport.id,
            name: sport.name,
            description: sport.description,
            created_at: sport.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_description_defaults_to_empty() {
        let req: CreateSportRequest = serde_json::from_value(json!({ "name": "basket" })).unwrap();
        assert_eq!(req.description, "");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_name_is_required() {
        assert!(serde_json::from_value::<CreateSportRequest>(json!({})).is_err());

        let req: CreateSportRequest = serde_json::from_value(json!({ "name": " " })).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_rejects_non_string_description() {
        let result = serde_json::from_value::<UpdateSportRequest>(json!({ "description": 1 }));
        assert!(result.is_err());
    }
}
