use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::{validate_interests, validate_not_empty};

/// Body of `POST /api/history-inputs`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTemplateRequest {
    /// Falls back to the default template name when omitted
    #[serde(default, alias = "template_name")]
    #[validate(length(min = 1, max = 255), custom = "validate_not_empty")]
    pub name: Option<String>,

    #[validate(length(max = 255), custom = "validate_not_empty")]
    pub location: String,

    #[serde(alias = "accommodation")]
    #[validate(length(max = 100), custom = "validate_not_empty")]
    pub rest_type: String,

    #[serde(default = "default_group_size")]
    #[validate(range(min = 1, max = 100))]
    pub group_size: i32,

    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    #[serde(default = "default_duration_days")]
    #[validate(range(min = 1, max = 365))]
    pub duration_days: i32,

    #[validate(length(max = 100), custom = "validate_not_empty")]
    pub difficulty: String,

    #[serde(default, alias = "interests")]
    #[validate(custom = "validate_interests")]
    pub personal_interest: Vec<String>,
}

fn default_group_size() -> i32 {
    1
}

fn default_duration_days() -> i32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_aliases() {
        let request: CreateTemplateRequest = serde_json::from_value(serde_json::json!({
            "location": "Da Lat",
            "accommodation": "Homestay",
            "difficulty": "Người mới",
            "duration_days": 3,
            "interests": ["Coffee", "Cloud Hunting"]
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.name, None);
        assert_eq!(request.rest_type, "Homestay");
        assert_eq!(request.group_size, 1);
        assert_eq!(request.personal_interest.len(), 2);
    }

    #[test]
    fn test_blank_name_rejected() {
        let request: CreateTemplateRequest = serde_json::from_value(serde_json::json!({
            "name": "   ",
            "location": "Sapa",
            "rest_type": "Camping",
            "difficulty": "Chuyên nghiệp"
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }
}
