//! Trip template model
//!
//! Saved "quick input" defaults for the planning wizard. Names are unique
//! per user.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_TEMPLATE_NAME: &str = "Mẫu nhập nhanh";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripTemplate {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub location: String,
    pub rest_type: String,
    pub group_size: i32,
    pub start_date: Option<NaiveDate>,
    pub duration_days: i32,
    pub difficulty: String,
    pub personal_interest: Vec<String>,
    pub created_at: DateTime<Utc>,
}
