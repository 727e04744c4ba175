use axum::{extract::{State, Path}, response::IntoResponse, http::StatusCode, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::{
    requests::{CreateRoomRequest, UpdateRoomRequest},
    responses::RoomResponse,
};
use crate::domain::models::room::Room;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role().can_manage_catalog() {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Room name is required".into()));
    }
    if payload.capacity < 0 {
        return Err(AppError::Validation("Capacity cannot be negative".into()));
    }

    let room = Room::new(
        payload.name,
        payload.capacity,
        payload.color.unwrap_or_else(|| "#3174ad".to_string()),
        &payload.equipment,
        user.id,
    );

    let created = state.room_repo.create(&room).await?;
    info!("Room created: {}", created.id);

    Ok((StatusCode::CREATED, Json(RoomResponse::from(&created))))
}

pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let rooms = state.room_repo.list().await?;
    let body: Vec<RoomResponse> = rooms.iter().map(RoomResponse::from).collect();
    Ok(Json(body))
}

pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let room = state.room_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;
    Ok(Json(RoomResponse::from(&room)))
}

pub async fn update_room(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateRoomRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role().can_manage_catalog() {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }

    let mut room = state.room_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;

    if let Some(val) = payload.name { room.name = val; }
    if let Some(val) = payload.capacity {
        if val < 0 {
            return Err(AppError::Validation("Capacity cannot be negative".into()));
        }
        room.capacity = val;
    }
    if let Some(val) = payload.color { room.color = val; }
    if let Some(val) = payload.equipment {
        room.equipment_json = serde_json::to_string(&val)
            .map_err(|_| AppError::Validation("Invalid equipment list".into()))?;
    }

    let updated = state.room_repo.update(&room).await?;
    info!("Room updated: {}", id);
    Ok(Json(RoomResponse::from(&updated)))
}

pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role().can_manage_catalog() {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }

    state.room_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;

    state.room_repo.delete(&id).await?;
    info!("Room deleted: {}", id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
