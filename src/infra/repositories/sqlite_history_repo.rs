use crate::domain::{models::history::HistoryEntry, ports::HistoryRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteHistoryRepo {
    pool: SqlitePool,
}

impl SqliteHistoryRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryRepository for SqliteHistoryRepo {
    async fn record(&self, entry: &HistoryEntry) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO history (id, action, entity_type, entity_id, user_id, username, details, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
            .bind(&entry.id).bind(&entry.action).bind(&entry.entity_type).bind(&entry.entity_id)
            .bind(&entry.user_id).bind(&entry.username).bind(&entry.details).bind(entry.created_at)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn list(&self, limit: i64) -> Result<Vec<HistoryEntry>, AppError> {
        sqlx::query_as::<_, HistoryEntry>("SELECT * FROM history ORDER BY created_at DESC LIMIT ?")
            .bind(limit).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
