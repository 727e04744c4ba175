use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;

/// Advisory editing claim on a reservation. Purely a UX signal to reduce
/// concurrent-edit collisions; correctness lives in the store's
/// transactional overlap check.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct EditLock {
    pub reservation_id: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

pub const LOCK_TTL_MINUTES: i64 = 5;

impl EditLock {
    pub fn new(reservation_id: String, user_id: String) -> Self {
        let now = Utc::now();
        Self {
            reservation_id,
            user_id,
            expires_at: now + Duration::minutes(LOCK_TTL_MINUTES),
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}
