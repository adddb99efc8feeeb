use axum::{
    extract::{RawQuery, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::route_controller::RouteController;
use crate::dto::route_dto::parse_match_criteria;
use crate::models::route::{Route, RouteSummary};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::AppPath;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/suggested", get(suggest_routes))
        .route("/:id", get(get_route))
}

/// `GET /api/routes/suggested?location=..&difficulty=..&interests=..`
async fn suggest_routes(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<RouteSummary>>, AppError> {
    let criteria = parse_match_criteria(query.as_deref());
    let controller = RouteController::new(&state);
    let response = controller.suggest(&criteria).await?;
    Ok(Json(response))
}

async fn get_route(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Route>, AppError> {
    let controller = RouteController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}
