use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, password_hash: String, email: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            password_hash,
            email,
            role: role.as_str().to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn role(&self) -> Role {
        Role::parse(&self.role)
    }
}

/// Closed role set. The storage column is free text for historical reasons,
/// so parsing is case-insensitive and unknown values degrade to `Reader`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Superadmin,
    Admin,
    Manager,
    User,
    Reader,
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "superadmin" => Role::Superadmin,
            "admin" => Role::Admin,
            "manager" => Role::Manager,
            "user" => Role::User,
            _ => Role::Reader,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin",
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::User => "user",
            Role::Reader => "reader",
        }
    }

    /// Staff roles may create, move and delete reservations.
    pub fn can_edit_reservations(&self) -> bool {
        !matches!(self, Role::Reader)
    }

    pub fn can_manage_users(&self) -> bool {
        matches!(self, Role::Superadmin | Role::Admin)
    }

    /// Rooms and activities are reference data; managers curate them.
    pub fn can_manage_catalog(&self) -> bool {
        matches!(self, Role::Superadmin | Role::Admin | Role::Manager)
    }

    pub fn can_view_history(&self) -> bool {
        matches!(self, Role::Superadmin | Role::Admin | Role::Manager)
    }
}
