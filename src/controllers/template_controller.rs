use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::template_dto::CreateTemplateRequest;
use crate::dto::ApiResponse;
use crate::models::template::{TripTemplate, DEFAULT_TEMPLATE_NAME};
use crate::repositories::TemplateRepository;
use crate::state::AppState;
use crate::utils::errors::{duplicate_name_error, not_found_error, AppError};
use crate::utils::validation::{non_blank, normalize_labels};

pub struct TemplateController {
    templates: Arc<dyn TemplateRepository>,
}

impl TemplateController {
    pub fn new(state: &AppState) -> Self {
        Self {
            templates: state.templates.clone(),
        }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateTemplateRequest,
    ) -> Result<ApiResponse<TripTemplate>, AppError> {
        request.validate()?;

        let name = non_blank(request.name.as_deref())
            .unwrap_or(DEFAULT_TEMPLATE_NAME)
            .to_string();

        // Fast path; the store still rejects a concurrent duplicate.
        if self.templates.name_exists(user_id, &name).await? {
            return Err(duplicate_name_error("trip template", &name));
        }

        let template = TripTemplate {
            id: Uuid::new_v4(),
            user_id,
            name,
            location: request.location.trim().to_string(),
            rest_type: request.rest_type.trim().to_string(),
            group_size: request.group_size,
            start_date: request.start_date,
            duration_days: request.duration_days,
            difficulty: request.difficulty.trim().to_string(),
            personal_interest: normalize_labels(&request.personal_interest),
            created_at: Utc::now(),
        };

        let saved = self.templates.create(&template).await?;
        tracing::info!(template_id = %saved.id, %user_id, name = %saved.name, "trip template saved");
        Ok(ApiResponse::success_with_message(saved, "Trip template saved successfully"))
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<TripTemplate>, AppError> {
        self.templates.list_for_user(user_id).await
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.templates.delete_for_user(user_id, id).await? {
            return Err(not_found_error("Trip template", &id.to_string()));
        }
        Ok(ApiResponse::message("Trip template deleted successfully"))
    }
}
