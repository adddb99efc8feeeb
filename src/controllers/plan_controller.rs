use std::sync::Arc;

use uuid::Uuid;

use crate::dto::plan_dto::{CreatePlanRequest, UpdatePlanRequest};
use crate::dto::ApiResponse;
use crate::models::plan::Plan;
use crate::repositories::PlanRepository;
use crate::services::PlanComposer;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct PlanController {
    plans: Arc<dyn PlanRepository>,
    composer: PlanComposer,
}

impl PlanController {
    pub fn new(state: &AppState) -> Self {
        Self {
            plans: state.plans.clone(),
            composer: state.plan_composer(),
        }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreatePlanRequest,
    ) -> Result<ApiResponse<Plan>, AppError> {
        let plan = self.composer.create_plan(user_id, request).await?;
        Ok(ApiResponse::success_with_message(plan, "Plan created successfully"))
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Plan>, AppError> {
        self.plans.list_for_user(user_id).await
    }

    pub async fn get_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Plan, AppError> {
        self.plans
            .find_for_user(user_id, id)
            .await?
            .ok_or_else(|| not_found_error("Plan", &id.to_string()))
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        request: UpdatePlanRequest,
    ) -> Result<ApiResponse<Plan>, AppError> {
        let plan = self.composer.update_plan(user_id, id, request).await?;
        Ok(ApiResponse::success_with_message(plan, "Plan updated successfully"))
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.plans.delete_for_user(user_id, id).await? {
            return Err(not_found_error("Plan", &id.to_string()));
        }
        tracing::info!(plan_id = %id, %user_id, "plan deleted");
        Ok(ApiResponse::message("Plan deleted successfully"))
    }
}
