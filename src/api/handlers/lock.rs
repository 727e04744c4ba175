use axum::{extract::{State, Path}, response::IntoResponse, http::StatusCode, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::lock::EditLock;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

/// Claims the advisory edit lock on a reservation. An unexpired lock held
/// by another user wins; a stale or own lock is replaced and its TTL
/// restarts.
pub async fn claim_lock(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(reservation_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role().can_edit_reservations() {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }

    state.reservation_repo.find_by_id(&reservation_id).await?
        .ok_or(AppError::NotFound("Reservation not found".into()))?;

    if let Some(existing) = state.lock_repo.find(&reservation_id).await? {
        if !existing.is_expired() && existing.user_id != user.id {
            return Err(AppError::Conflict("Reservation is being edited by another user".into()));
        }
    }

    let lock = EditLock::new(reservation_id.clone(), user.id.clone());
    let saved = state.lock_repo.upsert(&lock).await?;

    info!("Edit lock claimed on {} by {}", reservation_id, user.id);
    Ok((StatusCode::OK, Json(saved)))
}

/// Releases the caller's own lock. Releasing a lock that is absent or held
/// by someone else is a no-op.
pub async fn release_lock(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(reservation_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.lock_repo.release(&reservation_id, &user.id).await?;
    info!("Edit lock released on {} by {}", reservation_id, user.id);
    Ok(Json(serde_json::json!({"status": "released"})))
}
