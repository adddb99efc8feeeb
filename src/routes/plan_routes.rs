use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::plan_controller::PlanController;
use crate::dto::plan_dto::{CreatePlanRequest, UpdatePlanRequest};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::plan::Plan;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{AppJson, AppPath};

pub fn create_plan_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_plans).post(create_plan))
        .route(
            "/:id",
            get(get_plan)
                .put(update_plan)
                .patch(update_plan)
                .delete(delete_plan),
        )
}

async fn create_plan(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    AppJson(request): AppJson<CreatePlanRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Plan>>), AppError> {
    let controller = PlanController::new(&state);
    let response = controller.create(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_plans(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Plan>>, AppError> {
    let controller = PlanController::new(&state);
    let response = controller.list(user.user_id).await?;
    Ok(Json(response))
}

async fn get_plan(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Plan>, AppError> {
    let controller = PlanController::new(&state);
    let response = controller.get_by_id(user.user_id, id).await?;
    Ok(Json(response))
}

async fn update_plan(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdatePlanRequest>,
) -> Result<Json<ApiResponse<Plan>>, AppError> {
    let controller = PlanController::new(&state);
    let response = controller.update(user.user_id, id, request).await?;
    Ok(Json(response))
}

async fn delete_plan(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = PlanController::new(&state);
    let response = controller.delete(user.user_id, id).await?;
    Ok(Json(response))
}
