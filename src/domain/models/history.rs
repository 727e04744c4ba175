use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct HistoryEntry {
    pub id: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    pub user_id: String,
    pub username: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(action: &str, entity_type: &str, entity_id: &str, user_id: &str, username: &str, details: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
            user_id: user_id.to_string(),
            username: username.to_string(),
            details,
            created_at: Utc::now(),
        }
    }
}
