//! Plan composer
//!
//! Builds plans from the wizard input: checks the route reference, asks the
//! recommendation engine for equipment and dangers, and stores the result.
//! Updates follow `PlanUpdatePolicy`.

use std::borrow::Cow;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::dto::plan_dto::{CreatePlanRequest, UpdatePlanRequest};
use crate::models::{plan::Plan, route::Route};
use crate::repositories::{PlanRepository, RouteRepository};
use crate::services::recommendation_engine::RecommendationEngine;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};

/// Which plan fields may change after creation.
///
/// The route reference and the two generated snapshots are always
/// mutable. Trip parameters only when `trip_params_mutable` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanUpdatePolicy {
    pub trip_params_mutable: bool,
}

pub struct PlanComposer {
    routes: Arc<dyn RouteRepository>,
    plans: Arc<dyn PlanRepository>,
    engine: Arc<dyn RecommendationEngine>,
    policy: PlanUpdatePolicy,
}

impl PlanComposer {
    pub fn new(
        routes: Arc<dyn RouteRepository>,
        plans: Arc<dyn PlanRepository>,
        engine: Arc<dyn RecommendationEngine>,
        policy: PlanUpdatePolicy,
    ) -> Self {
        Self {
            routes,
            plans,
            engine,
            policy,
        }
    }

    async fn resolve_route(&self, route_id: Uuid) -> AppResult<Route> {
        self.routes
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| validation_error("route_id", format!("Route '{}' does not exist", route_id)))
    }

    pub async fn create_plan(&self, user_id: Uuid, request: CreatePlanRequest) -> AppResult<Plan> {
        request.validate()?;

        let route = match request.route_id {
            Some(route_id) => Some(self.resolve_route(route_id).await?),
            None => None,
        };

        let params = request.trip_params();
        let equipment = self.engine.generate_equipment(route.as_ref(), &params).await?;
        let dangers = self.engine.generate_dangers(route.as_ref(), &params).await?;

        let mut plan = Plan::new(
            user_id,
            route.as_ref().map(|r| r.id),
            request.name.trim().to_string(),
            params,
        );
        plan.personalized_equipment_list = Some(equipment);
        plan.dangers_snapshot = Some(dangers);

        let saved = self.plans.create(&plan).await?;
        tracing::info!(plan_id = %saved.id, %user_id, route_id = ?saved.route_id, "plan created");
        Ok(saved)
    }

    pub async fn update_plan(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
        request: UpdatePlanRequest,
    ) -> AppResult<Plan> {
        request.validate()?;

        let mut plan = self
            .plans
            .find_for_user(user_id, plan_id)
            .await?
            .ok_or_else(|| not_found_error("Plan", &plan_id.to_string()))?;

        let trip_fields = request.trip_param_fields();
        if !trip_fields.is_empty() && !self.policy.trip_params_mutable {
            return Err(immutable_fields_error(&trip_fields));
        }

        if let Some(route_id) = request.route_id {
            plan.route_id = match route_id {
                Some(id) => Some(self.resolve_route(id).await?.id),
                None => None,
            };
        }
        if let Some(equipment) = request.personalized_equipment_list {
            plan.personalized_equipment_list = Some(equipment);
        }
        if let Some(dangers) = request.dangers_snapshot {
            plan.dangers_snapshot = Some(dangers);
        }

        if let Some(name) = request.name {
            plan.name = name.trim().to_string();
        }
        if let Some(location) = request.location {
            plan.params.location = location.trim().to_string();
        }
        if let Some(rest_type) = request.rest_type {
            plan.params.rest_type = rest_type.trim().to_string();
        }
        if let Some(group_size) = request.group_size {
            plan.params.group_size = group_size;
        }
        if let Some(start_date) = request.start_date {
            plan.params.start_date = start_date;
        }
        if let Some(duration_days) = request.duration_days {
            plan.params.duration_days = duration_days;
        }
        if let Some(difficulty) = request.difficulty {
            plan.params.difficulty = difficulty.trim().to_string();
        }
        if let Some(interests) = request.personal_interest {
            plan.params.personal_interest = interests.iter().map(|i| i.trim().to_string()).collect();
        }

        plan.updated_at = Utc::now();

        let saved = self
            .plans
            .update(&plan)
            .await?
            .ok_or_else(|| not_found_error("Plan", &plan_id.to_string()))?;
        tracing::info!(plan_id = %saved.id, %user_id, "plan updated");
        Ok(saved)
    }
}

fn immutable_fields_error(fields: &[&'static str]) -> AppError {
    let mut errors = ValidationErrors::new();
    for field in fields {
        let mut error = ValidationError::new("immutable");
        error.message = Some(Cow::from(format!("'{}' cannot be changed after the plan is created", field)));
        errors.add(*field, error);
    }
    AppError::Validation(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;
    use crate::services::recommendation_engine::StaticRecommendationEngine;
    use chrono::NaiveDate;

    struct Fixture {
        store: Arc<MemoryStore>,
        route: Route,
    }

    async fn fixture() -> Fixture {
        let route = Route::new(
            "Lảo Thẩn",
            "Đỉnh nóc nhà Y Tý",
            16.0,
            2860.0,
            vec!["easy".into(), "Lào Cai".into(), "cloud-hunting".into()],
        );
        let store = Arc::new(MemoryStore::with_routes(vec![route.clone()]));
        Fixture { store, route }
    }

    fn composer(store: &Arc<MemoryStore>, policy: PlanUpdatePolicy) -> PlanComposer {
        PlanComposer::new(
            store.clone(),
            store.clone(),
            Arc::new(StaticRecommendationEngine::default()),
            policy,
        )
    }

    fn create_request(route_id: Option<Uuid>) -> CreatePlanRequest {
        CreatePlanRequest {
            route_id,
            name: "Săn mây Y Tý".into(),
            location: "Lào Cai".into(),
            rest_type: "Homestay".into(),
            group_size: 4,
            start_date: NaiveDate::from_ymd_opt(2025, 10, 2).unwrap(),
            duration_days: 2,
            difficulty: "Người mới".into(),
            personal_interest: vec!["cloud-hunting".into()],
        }
    }

    fn field_names(err: AppError) -> Vec<String> {
        match err {
            AppError::Validation(errors) => {
                let mut names: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
                names.sort();
                names
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_attaches_generated_snapshots() {
        let Fixture { store, route } = fixture().await;
        let composer = composer(&store, PlanUpdatePolicy::default());
        let user_id = Uuid::new_v4();

        let plan = composer.create_plan(user_id, create_request(Some(route.id))).await.unwrap();

        let engine = StaticRecommendationEngine::default();
        assert_eq!(plan.route_id, Some(route.id));
        assert_eq!(plan.personalized_equipment_list.as_ref(), Some(engine.equipment()));
        assert_eq!(plan.dangers_snapshot.as_deref(), Some(engine.dangers()));

        let stored = store.find_for_user(user_id, plan.id).await.unwrap().unwrap();
        assert_eq!(stored, plan);
    }

    #[tokio::test]
    async fn test_create_without_route() {
        let Fixture { store, .. } = fixture().await;
        let plan = composer(&store, PlanUpdatePolicy::default())
            .create_plan(Uuid::new_v4(), create_request(None))
            .await
            .unwrap();
        assert_eq!(plan.route_id, None);
        assert!(plan.dangers_snapshot.is_some());
    }

    #[tokio::test]
    async fn test_create_with_unknown_route_fails() {
        let Fixture { store, .. } = fixture().await;
        let user_id = Uuid::new_v4();
        let err = composer(&store, PlanUpdatePolicy::default())
            .create_plan(user_id, create_request(Some(Uuid::new_v4())))
            .await
            .unwrap_err();

        assert_eq!(field_names(err), vec!["route_id"]);
        assert!(PlanRepository::list_for_user(store.as_ref(), user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_route_and_snapshots() {
        let Fixture { store, route } = fixture().await;
        let composer = composer(&store, PlanUpdatePolicy::default());
        let user_id = Uuid::new_v4();
        let plan = composer.create_plan(user_id, create_request(None)).await.unwrap();

        let request = UpdatePlanRequest {
            route_id: Some(Some(route.id)),
            dangers_snapshot: Some(vec![]),
            ..UpdatePlanRequest::default()
        };
        let updated = composer.update_plan(user_id, plan.id, request).await.unwrap();
        assert_eq!(updated.route_id, Some(route.id));
        assert_eq!(updated.dangers_snapshot, Some(vec![]));
        // not regenerated on route change
        assert_eq!(updated.personalized_equipment_list, plan.personalized_equipment_list);

        let detach = UpdatePlanRequest {
            route_id: Some(None),
            ..UpdatePlanRequest::default()
        };
        let updated = composer.update_plan(user_id, plan.id, detach).await.unwrap();
        assert_eq!(updated.route_id, None);
    }

    #[tokio::test]
    async fn test_update_with_unknown_route_fails() {
        let Fixture { store, .. } = fixture().await;
        let composer = composer(&store, PlanUpdatePolicy::default());
        let user_id = Uuid::new_v4();
        let plan = composer.create_plan(user_id, create_request(None)).await.unwrap();

        let request = UpdatePlanRequest {
            route_id: Some(Some(Uuid::new_v4())),
            ..UpdatePlanRequest::default()
        };
        let err = composer.update_plan(user_id, plan.id, request).await.unwrap_err();
        assert_eq!(field_names(err), vec!["route_id"]);
    }

    #[tokio::test]
    async fn test_trip_params_locked_by_default() {
        let Fixture { store, .. } = fixture().await;
        let composer = composer(&store, PlanUpdatePolicy::default());
        let user_id = Uuid::new_v4();
        let plan = composer.create_plan(user_id, create_request(None)).await.unwrap();

        let request = UpdatePlanRequest {
            group_size: Some(8),
            start_date: NaiveDate::from_ymd_opt(2025, 11, 1),
            ..UpdatePlanRequest::default()
        };
        let err = composer.update_plan(user_id, plan.id, request).await.unwrap_err();
        assert_eq!(field_names(err), vec!["group_size", "start_date"]);

        let stored = store.find_for_user(user_id, plan.id).await.unwrap().unwrap();
        assert_eq!(stored.params.group_size, 4);
    }

    #[tokio::test]
    async fn test_trip_params_mutable_when_allowed() {
        let Fixture { store, .. } = fixture().await;
        let composer = composer(
            &store,
            PlanUpdatePolicy {
                trip_params_mutable: true,
            },
        );
        let user_id = Uuid::new_v4();
        let plan = composer.create_plan(user_id, create_request(None)).await.unwrap();

        let request = UpdatePlanRequest {
            group_size: Some(8),
            name: Some(" Y Tý mùa lúa ".into()),
            ..UpdatePlanRequest::default()
        };
        let updated = composer.update_plan(user_id, plan.id, request).await.unwrap();
        assert_eq!(updated.params.group_size, 8);
        assert_eq!(updated.name, "Y Tý mùa lúa");
        assert_eq!(updated.created_at, plan.created_at);
    }

    #[tokio::test]
    async fn test_update_other_users_plan_is_not_found() {
        let Fixture { store, .. } = fixture().await;
        let composer = composer(&store, PlanUpdatePolicy::default());
        let plan = composer.create_plan(Uuid::new_v4(), create_request(None)).await.unwrap();

        let err = composer
            .update_plan(Uuid::new_v4(), plan.id, UpdatePlanRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_locked_fields_on_other_users_plan_is_not_found() {
        let Fixture { store, .. } = fixture().await;
        let composer = composer(&store, PlanUpdatePolicy::default());
        let plan = composer.create_plan(Uuid::new_v4(), create_request(None)).await.unwrap();

        let request = UpdatePlanRequest {
            group_size: Some(2),
            ..UpdatePlanRequest::default()
        };
        let err = composer
            .update_plan(Uuid::new_v4(), plan.id, request)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
