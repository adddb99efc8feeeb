//! Plan model
//!
//! A user's concrete trip, bound to at most one route. The equipment list
//! and dangers are snapshots taken when the plan is created and are only
//! changed by an explicit update.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub item: String,
    #[serde(alias = "qty")]
    pub quantity: u32,
    #[serde(default)]
    pub note: String,
}

impl EquipmentItem {
    pub fn new(item: &str, quantity: u32, note: &str) -> Self {
        Self {
            item: item.to_string(),
            quantity,
            note: note.to_string(),
        }
    }
}

/// Category name -> items in that category
pub type EquipmentList = BTreeMap<String, Vec<EquipmentItem>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Danger {
    pub name: String,
    pub detail: String,
}

impl Danger {
    pub fn new(name: &str, detail: &str) -> Self {
        Self {
            name: name.to_string(),
            detail: detail.to_string(),
        }
    }
}

/// Trip parameters collected by the planning wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripParams {
    pub location: String,
    pub rest_type: String,
    pub group_size: i32,
    pub start_date: NaiveDate,
    pub duration_days: i32,
    pub difficulty: String,
    #[serde(default)]
    pub personal_interest: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub route_id: Option<Uuid>,
    pub name: String,
    #[serde(flatten)]
    pub params: TripParams,
    pub personalized_equipment_list: Option<EquipmentList>,
    pub dangers_snapshot: Option<Vec<Danger>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Plan {
    pub fn new(user_id: Uuid, route_id: Option<Uuid>, name: String, params: TripParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            route_id,
            name,
            params,
            personalized_equipment_list: None,
            dangers_snapshot: None,
            created_at: now,
            updated_at: now,
        }
    }
}
