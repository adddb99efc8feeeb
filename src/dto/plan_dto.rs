use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;

use crate::models::plan::{Danger, EquipmentList, TripParams};
use crate::utils::validation::{validate_interests, validate_not_empty};

/// Body of `POST /api/plans`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePlanRequest {
    #[serde(default, alias = "route")]
    pub route_id: Option<Uuid>,

    #[validate(length(min = 1, max = 255), custom = "validate_not_empty")]
    pub name: String,

    #[validate(length(max = 255), custom = "validate_not_empty")]
    pub location: String,

    #[validate(length(max = 100), custom = "validate_not_empty")]
    pub rest_type: String,

    #[validate(range(min = 1, max = 100))]
    pub group_size: i32,

    pub start_date: NaiveDate,

    #[validate(range(min = 1, max = 365))]
    pub duration_days: i32,

    #[validate(length(max = 100), custom = "validate_not_empty")]
    pub difficulty: String,

    #[serde(default, alias = "interests")]
    #[validate(custom = "validate_interests")]
    pub personal_interest: Vec<String>,
}

impl CreatePlanRequest {
    pub fn trip_params(&self) -> TripParams {
        TripParams {
            location: self.location.trim().to_string(),
            rest_type: self.rest_type.trim().to_string(),
            group_size: self.group_size,
            start_date: self.start_date,
            duration_days: self.duration_days,
            difficulty: self.difficulty.trim().to_string(),
            personal_interest: self.personal_interest.iter().map(|i| i.trim().to_string()).collect(),
        }
    }
}

/// Body of `PUT/PATCH /api/plans/:id`.
///
/// Only the fields present are applied. `route_id: null` detaches the
/// route; leaving it out keeps the current one.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePlanRequest {
    #[serde(default, alias = "route", deserialize_with = "double_option")]
    pub route_id: Option<Option<Uuid>>,

    pub personalized_equipment_list: Option<EquipmentList>,

    #[serde(alias = "dangers")]
    pub dangers_snapshot: Option<Vec<Danger>>,

    #[validate(length(min = 1, max = 255), custom = "validate_not_empty")]
    pub name: Option<String>,

    #[validate(length(max = 255), custom = "validate_not_empty")]
    pub location: Option<String>,

    #[validate(length(max = 100), custom = "validate_not_empty")]
    pub rest_type: Option<String>,

    #[validate(range(min = 1, max = 100))]
    pub group_size: Option<i32>,

    pub start_date: Option<NaiveDate>,

    #[validate(range(min = 1, max = 365))]
    pub duration_days: Option<i32>,

    #[validate(length(max = 100), custom = "validate_not_empty")]
    pub difficulty: Option<String>,

    #[serde(alias = "interests")]
    #[validate(custom = "validate_interests")]
    pub personal_interest: Option<Vec<String>>,
}

impl UpdatePlanRequest {
    /// Names of the trip-parameter fields carried by this request
    pub fn trip_param_fields(&self) -> Vec<&'static str> {
        [
            ("name", self.name.is_some()),
            ("location", self.location.is_some()),
            ("rest_type", self.rest_type.is_some()),
            ("group_size", self.group_size.is_some()),
            ("start_date", self.start_date.is_some()),
            ("duration_days", self.duration_days.is_some()),
            ("difficulty", self.difficulty.is_some()),
            ("personal_interest", self.personal_interest.is_some()),
        ]
        .into_iter()
        .filter_map(|(field, present)| present.then_some(field))
        .collect()
    }
}

/// Tell "absent" (`None`) apart from an explicit `null` (`Some(None)`)
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
