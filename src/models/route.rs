//! Route model
//!
//! A catalogued trekking itinerary. Maps to the `routes` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Route {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub total_distance_km: f64,
    pub elevation_gain_m: f64,
    /// Difficulty token, location and free-form interest labels
    pub tags: Vec<String>,
    pub gallery: Vec<String>,
    /// Route geometry as stored by the catalog tooling, returned only by the
    /// detail endpoint
    pub path_coordinates: Option<serde_json::Value>,
    pub ai_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Route {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        total_distance_km: f64,
        elevation_gain_m: f64,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            total_distance_km,
            elevation_gain_m,
            tags,
            gallery: Vec::new(),
            path_coordinates: None,
            ai_note: None,
            created_at: Utc::now(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Compact shape returned by the suggestion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub total_distance_km: f64,
    pub elevation_gain_m: f64,
    pub tags: Vec<String>,
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        Self {
            id: route.id,
            name: route.name.clone(),
            description: route.description.clone(),
            total_distance_km: route.total_distance_km,
            elevation_gain_m: route.elevation_gain_m,
            tags: route.tags.clone(),
        }
    }
}
