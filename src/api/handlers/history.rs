use axum::{extract::{State, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::error::AppError;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

pub async fn list_history(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role().can_view_history() {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }

    let limit = query.limit.unwrap_or(100).clamp(1, 1000);
    let entries = state.history_repo.list(limit).await?;
    Ok(Json(entries))
}
