use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::PlanRepository;
use crate::models::plan::{Danger, EquipmentList, Plan, TripParams};
use crate::utils::errors::AppResult;

/// Row shape of the `plans` table; JSONB columns decode through `Json`
#[derive(Debug, sqlx::FromRow)]
struct PlanRow {
    id: Uuid,
    user_id: Uuid,
    route_id: Option<Uuid>,
    name: String,
    location: String,
    rest_type: String,
    group_size: i32,
    start_date: NaiveDate,
    duration_days: i32,
    difficulty: String,
    personal_interest: Json<Vec<String>>,
    personalized_equipment_list: Option<Json<EquipmentList>>,
    dangers_snapshot: Option<Json<Vec<Danger>>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PlanRow> for Plan {
    fn from(row: PlanRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            route_id: row.route_id,
            name: row.name,
            params: TripParams {
                location: row.location,
                rest_type: row.rest_type,
                group_size: row.group_size,
                start_date: row.start_date,
                duration_days: row.duration_days,
                difficulty: row.difficulty,
                personal_interest: row.personal_interest.0,
            },
            personalized_equipment_list: row.personalized_equipment_list.map(|j| j.0),
            dangers_snapshot: row.dangers_snapshot.map(|j| j.0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgPlanRepository {
    pool: PgPool,
}

impl PgPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepository for PgPlanRepository {
    async fn create(&self, plan: &Plan) -> AppResult<Plan> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            INSERT INTO plans (
                id, user_id, route_id, name, location, rest_type, group_size,
                start_date, duration_days, difficulty, personal_interest,
                personalized_equipment_list, dangers_snapshot, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(plan.id)
        .bind(plan.user_id)
        .bind(plan.route_id)
        .bind(&plan.name)
        .bind(&plan.params.location)
        .bind(&plan.params.rest_type)
        .bind(plan.params.group_size)
        .bind(plan.params.start_date)
        .bind(plan.params.duration_days)
        .bind(&plan.params.difficulty)
        .bind(Json(&plan.params.personal_interest))
        .bind(plan.personalized_equipment_list.as_ref().map(Json))
        .bind(plan.dangers_snapshot.as_ref().map(Json))
        .bind(plan.created_at)
        .bind(plan.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Plan>> {
        let row = sqlx::query_as::<_, PlanRow>("SELECT * FROM plans WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Plan::from))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Plan>> {
        let rows = sqlx::query_as::<_, PlanRow>(
            "SELECT * FROM plans WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Plan::from).collect())
    }

    async fn update(&self, plan: &Plan) -> AppResult<Option<Plan>> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            UPDATE plans
            SET route_id = $3, name = $4, location = $5, rest_type = $6, group_size = $7,
                start_date = $8, duration_days = $9, difficulty = $10, personal_interest = $11,
                personalized_equipment_list = $12, dangers_snapshot = $13, updated_at = $14
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(plan.id)
        .bind(plan.user_id)
        .bind(plan.route_id)
        .bind(&plan.name)
        .bind(&plan.params.location)
        .bind(&plan.params.rest_type)
        .bind(plan.params.group_size)
        .bind(plan.params.start_date)
        .bind(plan.params.duration_days)
        .bind(&plan.params.difficulty)
        .bind(Json(&plan.params.personal_interest))
        .bind(plan.personalized_equipment_list.as_ref().map(Json))
        .bind(plan.dangers_snapshot.as_ref().map(Json))
        .bind(plan.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Plan::from))
    }

    async fn delete_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM plans WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
