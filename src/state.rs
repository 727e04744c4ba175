use std::sync::Arc;
use crate::domain::ports::{
    RoomRepository, ActivityRepository, ReservationRepository, UserRepository,
    AuthRepository, HistoryRepository, EditLockRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub room_repo: Arc<dyn RoomRepository>,
    pub activity_repo: Arc<dyn ActivityRepository>,
    pub reservation_repo: Arc<dyn ReservationRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub history_repo: Arc<dyn HistoryRepository>,
    pub lock_repo: Arc<dyn EditLockRepository>,
    pub auth_service: Arc<AuthService>,
}
