//! Equipment and hazard generation
//!
//! `RecommendationEngine` is the seam where a rule engine or an ML service
//! plugs in. The plan composer only depends on the trait.

use async_trait::async_trait;

use crate::models::{
    plan::{Danger, EquipmentItem, EquipmentList, TripParams},
    route::Route,
};
use crate::utils::errors::AppResult;

#[async_trait]
pub trait RecommendationEngine: Send + Sync {
    async fn generate_equipment(
        &self,
        route: Option<&Route>,
        params: &TripParams,
    ) -> AppResult<EquipmentList>;

    async fn generate_dangers(&self, route: Option<&Route>, params: &TripParams) -> AppResult<Vec<Danger>>;
}

/// Returns the same configured lists for every trip
#[derive(Debug, Clone)]
pub struct StaticRecommendationEngine {
    equipment: EquipmentList,
    dangers: Vec<Danger>,
}

impl StaticRecommendationEngine {
    pub fn new(equipment: EquipmentList, dangers: Vec<Danger>) -> Self {
        Self { equipment, dangers }
    }

    pub fn equipment(&self) -> &EquipmentList {
        &self.equipment
    }

    pub fn dangers(&self) -> &[Danger] {
        &self.dangers
    }
}

impl Default for StaticRecommendationEngine {
    fn default() -> Self {
        let mut equipment = EquipmentList::new();
        equipment.insert(
            "Gear".to_string(),
            vec![EquipmentItem::new("Backpack", 1, "30-40L recommended")],
        );
        equipment.insert(
            "Safety".to_string(),
            vec![EquipmentItem::new("First Aid Kit", 1, "Essential")],
        );

        let dangers = vec![Danger::new("Leech Risk", "High risk during rainy season.")];

        Self::new(equipment, dangers)
    }
}

#[async_trait]
impl RecommendationEngine for StaticRecommendationEngine {
    async fn generate_equipment(
        &self,
        _route: Option<&Route>,
        _params: &TripParams,
    ) -> AppResult<EquipmentList> {
        Ok(self.equipment.clone())
    }

    async fn generate_dangers(&self, _route: Option<&Route>, _params: &TripParams) -> AppResult<Vec<Danger>> {
        Ok(self.dangers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn params() -> TripParams {
        TripParams {
            location: "Quảng Bình".into(),
            rest_type: "Cắm trại".into(),
            group_size: 6,
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            duration_days: 4,
            difficulty: "Có kinh nghiệm".into(),
            personal_interest: vec!["caving".into()],
        }
    }

    #[tokio::test]
    async fn test_default_engine_output() {
        let engine = StaticRecommendationEngine::default();
        let equipment = engine.generate_equipment(None, &params()).await.unwrap();
        assert_eq!(equipment.keys().collect::<Vec<_>>(), vec!["Gear", "Safety"]);
        assert_eq!(equipment["Gear"][0].item, "Backpack");
        assert_eq!(equipment["Safety"][0].note, "Essential");

        let dangers = engine.generate_dangers(None, &params()).await.unwrap();
        assert_eq!(dangers, vec![Danger::new("Leech Risk", "High risk during rainy season.")]);
    }

    #[tokio::test]
    async fn test_custom_constants() {
        let engine = StaticRecommendationEngine::new(EquipmentList::new(), vec![Danger::new("Flash Flood", "Avoid streams after rain.")]);
        assert!(engine.generate_equipment(None, &params()).await.unwrap().is_empty());
        assert_eq!(engine.generate_dangers(None, &params()).await.unwrap()[0].name, "Flash Flood");
    }
}
