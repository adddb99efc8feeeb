//! Business services
//!
//! Route matching, plan composition and the recommendation engine seam.

pub mod plan_composer;
pub mod preference_matcher;
pub mod recommendation_engine;

pub use plan_composer::{PlanComposer, PlanUpdatePolicy};
pub use preference_matcher::{match_routes, MatchCriteria, MatcherConfig, TagMatch};
pub use recommendation_engine::{RecommendationEngine, StaticRecommendationEngine};
