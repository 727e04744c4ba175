use axum::{extract::{State, Path}, response::IntoResponse, http::StatusCode, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::CreateUserRequest;
use crate::domain::models::user::{Role, User};
use std::sync::Arc;
use crate::error::AppError;
use argon2::{Argon2, PasswordHasher};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use tracing::info;

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    AuthUser(admin): AuthUser,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !admin.role().can_manage_users() {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation("Username and password are required".into()));
    }
    if state.user_repo.find_by_username(&payload.username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    let user = User::new(payload.username, password_hash, payload.email, Role::parse(&payload.role));
    let created = state.user_repo.create(&user).await?;

    info!("Created user: {}", created.id);

    Ok((StatusCode::CREATED, Json(serde_json::json!({
        "id": created.id,
        "username": created.username,
        "email": created.email,
        "role": created.role,
        "createdAt": created.created_at
    }))))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AuthUser(admin): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    if !admin.role().can_manage_users() {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }

    let users = state.user_repo.list().await?;
    let safe_users: Vec<_> = users.into_iter().map(|u| serde_json::json!({
        "id": u.id,
        "username": u.username,
        "email": u.email,
        "role": u.role,
        "createdAt": u.created_at
    })).collect();

    Ok(Json(safe_users))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AuthUser(admin): AuthUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !admin.role().can_manage_users() {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }
    if admin.id == user_id {
        return Err(AppError::Validation("You cannot delete your own account".into()));
    }

    state.user_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    state.user_repo.delete(&user_id).await?;
    info!("User deleted: {}", user_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
