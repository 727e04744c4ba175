pub mod sqlite_room_repo;
pub mod sqlite_activity_repo;
pub mod sqlite_reservation_repo;
pub mod sqlite_user_repo;
pub mod sqlite_auth_repo;
pub mod sqlite_history_repo;
pub mod sqlite_lock_repo;

pub mod postgres_room_repo;
pub mod postgres_activity_repo;
pub mod postgres_reservation_repo;
pub mod postgres_user_repo;
pub mod postgres_auth_repo;
pub mod postgres_history_repo;
pub mod postgres_lock_repo;
