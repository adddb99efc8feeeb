//! Shared application state
//!
//! Everything the handlers need, passed through the axum router. The
//! storage traits are held as trait objects so the same router runs on
//! PostgreSQL or on the in-memory store.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    MemoryStore, PgPlanRepository, PgRouteRepository, PgTemplateRepository, PgUserRepository,
    PlanRepository, RouteRepository, TemplateRepository, UserRepository,
};
use crate::services::{
    MatcherConfig, PlanComposer, PlanUpdatePolicy, RecommendationEngine, StaticRecommendationEngine,
    TagMatch,
};
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub jwt: JwtConfig,
    pub users: Arc<dyn UserRepository>,
    pub routes: Arc<dyn RouteRepository>,
    pub plans: Arc<dyn PlanRepository>,
    pub templates: Arc<dyn TemplateRepository>,
    pub engine: Arc<dyn RecommendationEngine>,
    pub matcher: Arc<MatcherConfig>,
    pub plan_policy: PlanUpdatePolicy,
}

impl AppState {
    pub fn postgres(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self::build(
            config,
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgRouteRepository::new(pool.clone())),
            Arc::new(PgPlanRepository::new(pool.clone())),
            Arc::new(PgTemplateRepository::new(pool)),
        )
    }

    pub fn in_memory(store: Arc<MemoryStore>, config: EnvironmentConfig) -> Self {
        Self::build(config, store.clone(), store.clone(), store.clone(), store)
    }

    fn build(
        config: EnvironmentConfig,
        users: Arc<dyn UserRepository>,
        routes: Arc<dyn RouteRepository>,
        plans: Arc<dyn PlanRepository>,
        templates: Arc<dyn TemplateRepository>,
    ) -> Self {
        let plan_policy = PlanUpdatePolicy {
            trip_params_mutable: config.plan_trip_params_mutable,
        };
        let matcher = MatcherConfig {
            location_tag_match: if config.match_location_tags_case_sensitive {
                TagMatch::CaseSensitive
            } else {
                TagMatch::CaseInsensitive
            },
            ..MatcherConfig::default()
        };
        Self {
            jwt: JwtConfig::from(&config),
            config,
            users,
            routes,
            plans,
            templates,
            engine: Arc::new(StaticRecommendationEngine::default()),
            matcher: Arc::new(matcher),
            plan_policy,
        }
    }

    pub fn with_engine(mut self, engine: Arc<dyn RecommendationEngine>) -> Self {
        self.engine = engine;
        self
    }

    pub fn plan_composer(&self) -> PlanComposer {
        PlanComposer::new(
            self.routes.clone(),
            self.plans.clone(),
            self.engine.clone(),
            self.plan_policy,
        )
    }
}
