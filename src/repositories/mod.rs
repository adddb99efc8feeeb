//! Repositories
//!
//! Storage traits used by the controllers and services, with a PostgreSQL
//! implementation per aggregate and an in-process store that implements
//! all of them.

pub mod memory;
pub mod plan_repository;
pub mod route_repository;
pub mod template_repository;
pub mod user_repository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{plan::Plan, route::Route, template::TripTemplate, user::User};
use crate::utils::errors::AppResult;

pub use memory::MemoryStore;
pub use plan_repository::PgPlanRepository;
pub use route_repository::PgRouteRepository;
pub use template_repository::PgTemplateRepository;
pub use user_repository::PgUserRepository;

/// Read access to the route catalog
#[async_trait]
pub trait RouteRepository: Send + Sync {
    /// Whole catalog in catalog order
    async fn list_all(&self) -> AppResult<Vec<Route>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>>;
}

#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn create(&self, plan: &Plan) -> AppResult<Plan>;

    async fn find_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Plan>>;

    /// Newest first
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Plan>>;

    /// Persist every mutable column of `plan`. Returns `None` if the plan
    /// does not exist for that user.
    async fn update(&self, plan: &Plan) -> AppResult<Option<Plan>>;

    async fn delete_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn name_exists(&self, user_id: Uuid, name: &str) -> AppResult<bool>;

    /// Fails with `AppError::DuplicateName` when `(user_id, name)` is taken.
    async fn create(&self, template: &TripTemplate) -> AppResult<TripTemplate>;

    /// Newest first
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<TripTemplate>>;

    async fn delete_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Read-only lookup first; only a first-seen email takes a write.
    async fn find_or_create_by_email(&self, email: &str) -> AppResult<User>;

    /// Removes the user together with their plans and templates
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
