use crate::domain::models::{
    room::Room, activity::Activity, reservation::Reservation, user::User,
    auth::RefreshTokenRecord, history::HistoryEntry, lock::EditLock,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, room: &Room) -> Result<Room, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Room>, AppError>;
    async fn list(&self) -> Result<Vec<Room>, AppError>;
    async fn update(&self, room: &Room) -> Result<Room, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn create(&self, activity: &Activity) -> Result<Activity, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Activity>, AppError>;
    async fn list(&self) -> Result<Vec<Activity>, AppError>;
    async fn update(&self, activity: &Activity) -> Result<Activity, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Inserts after re-checking overlap for the same room inside the same
    /// transaction. The client-side check is advisory; this is the
    /// authoritative guard against double-booking.
    async fn create(&self, reservation: &Reservation) -> Result<Reservation, AppError>;
    /// Inserts a whole recurring batch in one transaction, re-checking each
    /// occurrence. Any conflict rolls back the entire batch.
    async fn create_batch(&self, reservations: &[Reservation]) -> Result<Vec<Reservation>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>, AppError>;
    async fn list(&self) -> Result<Vec<Reservation>, AppError>;
    async fn list_by_room(&self, room_id: &str) -> Result<Vec<Reservation>, AppError>;
    async fn list_by_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Reservation>, AppError>;
    /// Updates with the same in-transaction overlap re-check, excluding the
    /// reservation's own id.
    async fn update(&self, reservation: &Reservation) -> Result<Reservation, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    /// Deletes the given reservation and every occurrence referencing it as
    /// parent (cascade by `parent_reservation_id`).
    async fn delete_series(&self, parent_id: &str) -> Result<u64, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn count(&self) -> Result<i64, AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn record(&self, entry: &HistoryEntry) -> Result<(), AppError>;
    async fn list(&self, limit: i64) -> Result<Vec<HistoryEntry>, AppError>;
}

#[async_trait]
pub trait EditLockRepository: Send + Sync {
    async fn find(&self, reservation_id: &str) -> Result<Option<EditLock>, AppError>;
    async fn upsert(&self, lock: &EditLock) -> Result<EditLock, AppError>;
    async fn release(&self, reservation_id: &str, user_id: &str) -> Result<(), AppError>;
    async fn sweep_expired(&self) -> Result<u64, AppError>;
}
