use crate::domain::{models::activity::Activity, ports::ActivityRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresActivityRepo {
    pool: PgPool,
}

impl PostgresActivityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepo {
    async fn create(&self, activity: &Activity) -> Result<Activity, AppError> {
        sqlx::query_as::<_, Activity>(
            "INSERT INTO activities (id, name, description, instructor, category, requirements_json, created_by, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *"
        )
            .bind(&activity.id).bind(&activity.name).bind(&activity.description)
            .bind(&activity.instructor).bind(&activity.category).bind(&activity.requirements_json)
            .bind(&activity.created_by).bind(activity.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Activity>, AppError> {
        sqlx::query_as::<_, Activity>("SELECT * FROM activities WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Activity>, AppError> {
        sqlx::query_as::<_, Activity>("SELECT * FROM activities ORDER BY name ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, activity: &Activity) -> Result<Activity, AppError> {
        sqlx::query_as::<_, Activity>(
            "UPDATE activities SET name=$1, description=$2, instructor=$3, category=$4, requirements_json=$5 WHERE id=$6 RETURNING *"
        )
            .bind(&activity.name).bind(&activity.description).bind(&activity.instructor)
            .bind(&activity.category).bind(&activity.requirements_json).bind(&activity.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Activity not found".into()));
        }
        Ok(())
    }
}
