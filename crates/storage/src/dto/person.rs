use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::common::{validate_email, validate_name, validate_not_blank};
use crate::models::{Address, Person, PersonKind, PersonSport, Role};

/// Postal address attached to a person
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddressRequest {
    #[validate(length(min = 1, max = 255, message = "Street is required"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub street: String,

    #[validate(length(min = 1, max = 100, message = "City is required"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub city: String,

    #[validate(length(min = 1, max = 20, message = "Postal code is required"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub postal_code: String,
}

/// Request payload for creating a person, member or coach
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePersonRequest {
    #[validate(custom(function = "validate_name"))]
    pub firstname: String,

    #[validate(custom(function = "validate_name"))]
    pub lastname: String,

    #[validate(length(max = 255))]
    #[validate(custom(function = "validate_email"))]
    pub email: String,

    #[validate(nested)]
    pub address: Option<AddressRequest>,

    /// Coaches only
    #[validate(length(min = 1, max = 100))]
    pub contract: Option<String>,

    /// Coaches only
    #[validate(length(min = 1, max = 100))]
    pub degree: Option<String>,
}

/// Request payload for updating a person; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePersonRequest {
    #[validate(custom(function = "validate_name"))]
    pub firstname: Option<String>,

    #[validate(custom(function = "validate_name"))]
    pub lastname: Option<String>,

    #[validate(length(max = 255))]
    #[validate(custom(function = "validate_email"))]
    pub email: Option<String>,

    #[validate(nested)]
    pub address: Option<AddressRequest>,

    #[validate(length(min = 1, max = 100))]
    pub contract: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub degree: Option<String>,
}

impl UpdatePersonRequest {
    pub fn touches_coach_fields(&self) -> bool {
        self.contract.is_some() || self.degree.is_some()
    }
}

/// Skill level (or role) of a person within a sport
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SportLevelRequest {
    #[validate(length(min = 1, max = 50, message = "Level is required"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressResponse {
    pub street: String,
    pub city: String,
    pub postal_code: String,
}

/// A sport as seen from a person's profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSportResponse {
    pub id: Uuid,
    pub name: String,
    pub level: String,
}

/// Full person record, including address and sports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: PersonKind,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    pub address: Option<AddressResponse>,
    pub sports: Vec<PersonSportResponse>,
    pub created_at: NaiveDateTime,
}

impl PersonResponse {
    pub fn new(person: Person, address: Option<Address>, sports: Vec<PersonSport>) -> Self {
        let kind = person.kind();
        let (contract, degree) = match person.role {
            Role::Coach { contract, degree } => (Some(contract), Some(degree)),
            Role::Person | Role::Member => (None, None),
        };

        Self {
            id: person.id,
            kind,
            firstname: person.firstname,
            lastname: person.lastname,
            email: person.email,
            contract,
            degree,
            address: address.map(AddressResponse::from),
            sports: sports.into_iter().map(PersonSportResponse::from).collect(),
            created_at: person.created_at,
        }
    }
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            street: address.street,
            city: address.city,
            postal_code: address.postal_code,
        }
    }
}

impl From<PersonSport> for PersonSportResponse {
    fn from(link: PersonSport) -> Self {
        Self {
            id: link.sport_id,
            name: link.sport_name,
            level: link.level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn han() -> CreatePersonRequest {
        serde_json::from_value(json!({
            "firstname": "Han",
            "lastname": "Solo",
            "email": "han.solo@star.com",
            "contract": "CDD",
            "degree": "STAPS"
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_create_request() {
        assert!(han().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_do_not_deserialize() {
        let result = serde_json::from_value::<CreatePersonRequest>(json!({}));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut req = han();
        req.email = "test".to_string();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut req = han();
        req.firstname = "   ".to_string();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("firstname"));
    }

    #[test]
    fn test_name_length_ignores_surrounding_whitespace() {
        let mut req = han();
        req.firstname = format!("Han{}", " ".repeat(60));
        assert!(req.validate().is_ok());

        req.firstname = "x".repeat(51);
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("firstname"));

        let update = UpdatePersonRequest {
            lastname: Some(format!("  Solo{}", " ".repeat(60))),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_nested_address_validated() {
        let mut req = han();
        req.address = Some(AddressRequest {
            street: "21 rue docteur guerin".to_string(),
            city: "".to_string(),
            postal_code: "53000".to_string(),
        });
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_request_partial() {
        let req: UpdatePersonRequest =
            serde_json::from_value(json!({ "email": "john.do@updated.com" })).unwrap();
        assert!(req.validate().is_ok());
        assert!(!req.touches_coach_fields());

        let req: UpdatePersonRequest = serde_json::from_value(json!({ "email": "test" })).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_response_exposes_coach_fields_only_for_coaches() {
        let created_at = chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let coach = Person {
            id: Uuid::new_v4(),
            firstname: "john".to_string(),
            lastname: "do".to_string(),
            email: "john.do@mail.com".to_string(),
            created_at,
            role: Role::Coach {
                contract: "CDI".to_string(),
                degree: "BPJEPS".to_string(),
            },
        };
        let value = serde_json::to_value(PersonResponse::new(coach, None, vec![])).unwrap();
        assert_eq!(value["type"], "coach");
        assert_eq!(value["contract"], "CDI");
        assert_eq!(value["degree"], "BPJEPS");
        assert!(value["address"].is_null());
        assert_eq!(value["sports"], json!([]));

        let member = Person {
            id: Uuid::new_v4(),
            firstname: "rob".to_string(),
            lastname: "stark".to_string(),
            email: "rob.stark@winterfell.com".to_string(),
            created_at,
            role: Role::Member,
        };
        let value = serde_json::to_value(PersonResponse::new(member, None, vec![])).unwrap();
        assert_eq!(value["type"], "member");
        assert!(value.get("contract").is_none());
    }
}
