use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub description: String,
    pub instructor: String,
    pub category: String,
    pub requirements_json: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(
        name: String,
        description: String,
        instructor: String,
        category: String,
        requirements: &[String],
        created_by: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            instructor,
            category,
            requirements_json: serde_json::to_string(requirements).unwrap_or_else(|_| "[]".to_string()),
            created_by,
            created_at: Utc::now(),
        }
    }

    pub fn requirements(&self) -> Vec<String> {
        serde_json::from_str(&self.requirements_json).unwrap_or_default()
    }
}
