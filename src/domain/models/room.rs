use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub capacity: i32,
    pub color: String,
    pub equipment_json: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub fn new(name: String, capacity: i32, color: String, equipment: &[String], created_by: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            capacity,
            color,
            equipment_json: serde_json::to_string(equipment).unwrap_or_else(|_| "[]".to_string()),
            created_by,
            created_at: Utc::now(),
        }
    }

    pub fn equipment(&self) -> Vec<String> {
        serde_json::from_str(&self.equipment_json).unwrap_or_default()
    }
}
