use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::TemplateRepository;
use crate::models::template::TripTemplate;
use crate::utils::errors::{duplicate_name_error, AppError, AppResult};

const USER_NAME_CONSTRAINT: &str = "trip_templates_user_name_key";

#[derive(Debug, sqlx::FromRow)]
struct TemplateRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    location: String,
    rest_type: String,
    group_size: i32,
    start_date: Option<NaiveDate>,
    duration_days: i32,
    difficulty: String,
    personal_interest: Json<Vec<String>>,
    created_at: DateTime<Utc>,
}

impl From<TemplateRow> for TripTemplate {
    fn from(row: TemplateRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            location: row.location,
            rest_type: row.rest_type,
            group_size: row.group_size,
            start_date: row.start_date,
            duration_days: row.duration_days,
            difficulty: row.difficulty,
            personal_interest: row.personal_interest.0,
            created_at: row.created_at,
        }
    }
}

pub struct PgTemplateRepository {
    pool: PgPool,
}

impl PgTemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateRepository for PgTemplateRepository {
    async fn name_exists(&self, user_id: Uuid, name: &str) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM trip_templates WHERE user_id = $1 AND name = $2)",
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    async fn create(&self, template: &TripTemplate) -> AppResult<TripTemplate> {
        let row = sqlx::query_as::<_, TemplateRow>(
            r#"
            INSERT INTO trip_templates (
                id, user_id, name, location, rest_type, group_size,
                start_date, duration_days, difficulty, personal_interest, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(template.id)
        .bind(template.user_id)
        .bind(&template.name)
        .bind(&template.location)
        .bind(&template.rest_type)
        .bind(template.group_size)
        .bind(template.start_date)
        .bind(template.duration_days)
        .bind(&template.difficulty)
        .bind(Json(&template.personal_interest))
        .bind(template.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            // A concurrent insert won the race past the pre-check
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(USER_NAME_CONSTRAINT) => {
                duplicate_name_error("trip template", &template.name)
            }
            other => AppError::Database(other),
        })?;

        Ok(row.into())
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<TripTemplate>> {
        let rows = sqlx::query_as::<_, TemplateRow>(
            "SELECT * FROM trip_templates WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TripTemplate::from).collect())
    }

    async fn delete_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM trip_templates WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
