use std::sync::Arc;

use uuid::Uuid;

use crate::models::route::{Route, RouteSummary};
use crate::repositories::RouteRepository;
use crate::services::preference_matcher::{match_routes, MatchCriteria, MatcherConfig};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct RouteController {
    routes: Arc<dyn RouteRepository>,
    matcher: Arc<MatcherConfig>,
}

impl RouteController {
    pub fn new(state: &AppState) -> Self {
        Self {
            routes: state.routes.clone(),
            matcher: state.matcher.clone(),
        }
    }

    pub async fn suggest(&self, criteria: &MatchCriteria) -> Result<Vec<RouteSummary>, AppError> {
        let catalog = self.routes.list_all().await?;
        let suggestions = match_routes(&catalog, criteria, &self.matcher)
            .into_iter()
            .map(RouteSummary::from)
            .collect();
        Ok(suggestions)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Route, AppError> {
        self.routes
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Route", &id.to_string()))
    }
}
