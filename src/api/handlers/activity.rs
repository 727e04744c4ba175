use axum::{extract::{State, Path}, response::IntoResponse, http::StatusCode, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::{
    requests::{CreateActivityRequest, UpdateActivityRequest},
    responses::ActivityResponse,
};
use crate::domain::models::activity::Activity;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_activity(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateActivityRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role().can_manage_catalog() {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Activity name is required".into()));
    }

    let activity = Activity::new(
        payload.name,
        payload.description,
        payload.instructor,
        payload.category,
        &payload.requirements,
        user.id,
    );

    let created = state.activity_repo.create(&activity).await?;
    info!("Activity created: {}", created.id);

    Ok((StatusCode::CREATED, Json(ActivityResponse::from(&created))))
}

pub async fn list_activities(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let activities = state.activity_repo.list().await?;
    let body: Vec<ActivityResponse> = activities.iter().map(ActivityResponse::from).collect();
    Ok(Json(body))
}

pub async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let activity = state.activity_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Activity not found".into()))?;
    Ok(Json(ActivityResponse::from(&activity)))
}

pub async fn update_activity(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateActivityRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role().can_manage_catalog() {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }

    let mut activity = state.activity_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Activity not found".into()))?;

    if let Some(val) = payload.name { activity.name = val; }
    if let Some(val) = payload.description { activity.description = val; }
    if let Some(val) = payload.instructor { activity.instructor = val; }
    if let Some(val) = payload.category { activity.category = val; }
    if let Some(val) = payload.requirements {
        activity.requirements_json = serde_json::to_string(&val)
            .map_err(|_| AppError::Validation("Invalid requirements list".into()))?;
    }

    let updated = state.activity_repo.update(&activity).await?;
    info!("Activity updated: {}", id);
    Ok(Json(ActivityResponse::from(&updated)))
}

pub async fn delete_activity(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role().can_manage_catalog() {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }

    state.activity_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Activity not found".into()))?;

    state.activity_repo.delete(&id).await?;
    info!("Activity deleted: {}", id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
