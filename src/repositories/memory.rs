//! In-process store
//!
//! Implements every repository trait over plain vectors behind one
//! `RwLock`, so the same cascade and uniqueness rules as the SQL schema hold
//! atomically. Used by the test suite and by `STORAGE_BACKEND=memory`.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PlanRepository, RouteRepository, TemplateRepository, UserRepository};
use crate::models::{plan::Plan, route::Route, template::TripTemplate, user::User};
use crate::utils::errors::{duplicate_name_error, AppResult};

#[derive(Debug, Default)]
struct MemoryData {
    routes: Vec<Route>,
    users: Vec<User>,
    plans: Vec<Plan>,
    templates: Vec<TripTemplate>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<MemoryData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_routes(routes: Vec<Route>) -> Self {
        Self {
            data: RwLock::new(MemoryData {
                routes,
                ..MemoryData::default()
            }),
        }
    }

    /// Remove a route; plans that referenced it keep existing without one
    pub async fn delete_route(&self, id: Uuid) -> bool {
        let mut data = self.data.write().await;
        let before = data.routes.len();
        data.routes.retain(|r| r.id != id);
        if data.routes.len() == before {
            return false;
        }
        for plan in data.plans.iter_mut().filter(|p| p.route_id == Some(id)) {
            plan.route_id = None;
        }
        true
    }
}

fn newest_first<T, F>(mut items: Vec<T>, created_at: F) -> Vec<T>
where
    F: Fn(&T) -> chrono::DateTime<Utc>,
{
    // stable sort keeps later inserts ahead when timestamps tie
    items.reverse();
    items.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    items
}

#[async_trait]
impl RouteRepository for MemoryStore {
    async fn list_all(&self) -> AppResult<Vec<Route>> {
        Ok(self.data.read().await.routes.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>> {
        Ok(self.data.read().await.routes.iter().find(|r| r.id == id).cloned())
    }
}

#[async_trait]
impl PlanRepository for MemoryStore {
    async fn create(&self, plan: &Plan) -> AppResult<Plan> {
        self.data.write().await.plans.push(plan.clone());
        Ok(plan.clone())
    }

    async fn find_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Plan>> {
        Ok(self
            .data
            .read()
            .await
            .plans
            .iter()
            .find(|p| p.id == id && p.user_id == user_id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Plan>> {
        let plans: Vec<Plan> = self
            .data
            .read()
            .await
            .plans
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(plans, |p| p.created_at))
    }

    async fn update(&self, plan: &Plan) -> AppResult<Option<Plan>> {
        let mut data = self.data.write().await;
        match data
            .plans
            .iter_mut()
            .find(|p| p.id == plan.id && p.user_id == plan.user_id)
        {
            Some(existing) => {
                let created_at = existing.created_at;
                *existing = plan.clone();
                existing.created_at = created_at;
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let mut data = self.data.write().await;
        let before = data.plans.len();
        data.plans.retain(|p| !(p.id == id && p.user_id == user_id));
        Ok(data.plans.len() < before)
    }
}

#[async_trait]
impl TemplateRepository for MemoryStore {
    async fn name_exists(&self, user_id: Uuid, name: &str) -> AppResult<bool> {
        Ok(self
            .data
            .read()
            .await
            .templates
            .iter()
            .any(|t| t.user_id == user_id && t.name == name))
    }

    async fn create(&self, template: &TripTemplate) -> AppResult<TripTemplate> {
        let mut data = self.data.write().await;
        if data
            .templates
            .iter()
            .any(|t| t.user_id == template.user_id && t.name == template.name)
        {
            return Err(duplicate_name_error("trip template", &template.name));
        }
        data.templates.push(template.clone());
        Ok(template.clone())
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<TripTemplate>> {
        let templates: Vec<TripTemplate> = self
            .data
            .read()
            .await
            .templates
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(templates, |t| t.created_at))
    }

    async fn delete_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let mut data = self.data.write().await;
        let before = data.templates.len();
        data.templates.retain(|t| !(t.id == id && t.user_id == user_id));
        Ok(data.templates.len() < before)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_or_create_by_email(&self, email: &str) -> AppResult<User> {
        if let Some(user) = self.data.read().await.users.iter().find(|u| u.email == email) {
            return Ok(user.clone());
        }

        let mut data = self.data.write().await;
        // another request may have inserted it between the two locks
        if let Some(user) = data.users.iter().find(|u| u.email == email) {
            return Ok(user.clone());
        }
        let user = User::new(email);
        data.users.push(user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut data = self.data.write().await;
        let before = data.users.len();
        data.users.retain(|u| u.id != id);
        if data.users.len() == before {
            return Ok(false);
        }
        data.plans.retain(|p| p.user_id != id);
        data.templates.retain(|t| t.user_id != id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::TripParams;
    use crate::utils::errors::AppError;
    use chrono::NaiveDate;

    fn params() -> TripParams {
        TripParams {
            location: "Lâm Đồng".into(),
            rest_type: "Cắm trại".into(),
            group_size: 3,
            start_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            duration_days: 3,
            difficulty: "Chuyên nghiệp".into(),
            personal_interest: vec![],
        }
    }

    fn template(user_id: Uuid, name: &str) -> TripTemplate {
        TripTemplate {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            location: "Sapa".into(),
            rest_type: "Camping".into(),
            group_size: 1,
            start_date: None,
            duration_days: 2,
            difficulty: "Chuyên nghiệp".into(),
            personal_interest: vec![],
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_find_or_create_is_idempotent() {
        let store = MemoryStore::new();
        let first = store.find_or_create_by_email("a@trek.test").await.unwrap();
        let second = store.find_or_create_by_email("a@trek.test").await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_known_user_lookup_only_reads() {
        let store = MemoryStore::new();
        let user = store.find_or_create_by_email("c@trek.test").await.unwrap();

        // a write lock could not be taken while this reader is alive
        let _reader = store.data.read().await;
        let found = tokio::time::timeout(
            std::time::Duration::from_secs(1),
            store.find_or_create_by_email("c@trek.test"),
        )
        .await
        .expect("lookup of a known user blocked on the write lock")
        .unwrap();
        assert_eq!(found.id, user.id);
    }

    #[tokio::test]
    async fn test_template_uniqueness_is_per_user() {
        let store = MemoryStore::new();
        let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());

        TemplateRepository::create(&store, &template(alice, "Sapa Trek")).await.unwrap();
        TemplateRepository::create(&store, &template(bob, "Sapa Trek")).await.unwrap();
        let err = TemplateRepository::create(&store, &template(alice, "Sapa Trek"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateName(_)));
    }

    #[tokio::test]
    async fn test_deleting_route_detaches_plans() {
        let route = Route::new("Tà Năng - Phan Dũng", "", 55.0, 1100.0, vec!["hard".into()]);
        let store = MemoryStore::with_routes(vec![route.clone()]);
        let plan = Plan::new(Uuid::new_v4(), Some(route.id), "Đồi cỏ".into(), params());
        PlanRepository::create(&store, &plan).await.unwrap();

        assert!(store.delete_route(route.id).await);
        let stored = store.find_for_user(plan.user_id, plan.id).await.unwrap().unwrap();
        assert_eq!(stored.route_id, None);
    }

    #[tokio::test]
    async fn test_deleting_user_cascades() {
        let store = MemoryStore::new();
        let user = store.find_or_create_by_email("b@trek.test").await.unwrap();
        PlanRepository::create(&store, &Plan::new(user.id, None, "Trip".into(), params()))
            .await
            .unwrap();
        TemplateRepository::create(&store, &template(user.id, "Quick")).await.unwrap();

        assert!(UserRepository::delete(&store, user.id).await.unwrap());
        assert!(PlanRepository::list_for_user(&store, user.id).await.unwrap().is_empty());
        assert!(TemplateRepository::list_for_user(&store, user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_plans_are_scoped_to_owner() {
        let store = MemoryStore::new();
        let plan = Plan::new(Uuid::new_v4(), None, "Mine".into(), params());
        PlanRepository::create(&store, &plan).await.unwrap();

        let stranger = Uuid::new_v4();
        assert!(store.find_for_user(stranger, plan.id).await.unwrap().is_none());
        assert!(!PlanRepository::delete_for_user(&store, stranger, plan.id).await.unwrap());
        assert!(PlanRepository::delete_for_user(&store, plan.user_id, plan.id).await.unwrap());
    }
}
