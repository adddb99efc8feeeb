use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::template_controller::TemplateController;
use crate::dto::template_dto::CreateTemplateRequest;
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::template::TripTemplate;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{AppJson, AppPath};

pub fn create_template_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_templates).post(create_template))
        .route("/:id", delete(delete_template))
}

async fn create_template(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    AppJson(request): AppJson<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TripTemplate>>), AppError> {
    let controller = TemplateController::new(&state);
    let response = controller.create(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_templates(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<TripTemplate>>, AppError> {
    let controller = TemplateController::new(&state);
    let response = controller.list(user.user_id).await?;
    Ok(Json(response))
}

async fn delete_template(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = TemplateController::new(&state);
    let response = controller.delete(user.user_id, id).await?;
    Ok(Json(response))
}
