use crate::domain::{models::lock::EditLock, ports::EditLockRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresLockRepo {
    pool: PgPool,
}

impl PostgresLockRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EditLockRepository for PostgresLockRepo {
    async fn find(&self, reservation_id: &str) -> Result<Option<EditLock>, AppError> {
        sqlx::query_as::<_, EditLock>("SELECT * FROM edit_locks WHERE reservation_id = $1")
            .bind(reservation_id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn upsert(&self, lock: &EditLock) -> Result<EditLock, AppError> {
        sqlx::query_as::<_, EditLock>(
            "INSERT INTO edit_locks (reservation_id, user_id, expires_at, created_at)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (reservation_id) DO UPDATE SET user_id = excluded.user_id, expires_at = excluded.expires_at
             RETURNING *"
        )
            .bind(&lock.reservation_id).bind(&lock.user_id)
            .bind(lock.expires_at).bind(lock.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn release(&self, reservation_id: &str, user_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM edit_locks WHERE reservation_id = $1 AND user_id = $2")
            .bind(reservation_id).bind(user_id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn sweep_expired(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM edit_locks WHERE expires_at < $1")
            .bind(Utc::now()).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }
}
