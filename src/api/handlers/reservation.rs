use axum::{extract::{State, Path, Query}, response::IntoResponse, http::StatusCode, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::{
    requests::{CreateReservationRequest, ListReservationsQuery, RescheduleRequest, ScopeQuery, UpdateReservationRequest},
    responses::{RescheduleResponse, ReservationResponse},
};
use crate::domain::models::history::HistoryEntry;
use crate::domain::models::reservation::{NewReservationParams, Recurrence, RecurrenceKind, Reservation};
use crate::domain::services::{conflict, drag, interval, recurrence, series};
use crate::domain::services::drag::{DragInput, DragOutcome};
use crate::domain::services::interval::Interval;
use crate::domain::services::series::MutationScope;
use crate::error::AppError;
use chrono::{Duration, TimeZone, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role().can_edit_reservations() {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }

    let tz = state.config.timezone;

    let room = state.room_repo.find_by_id(&payload.room_id).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;
    let activity = state.activity_repo.find_by_id(&payload.activity_id).await?
        .ok_or(AppError::NotFound("Activity not found".into()))?;

    let parsed = interval::normalize(&payload.start_time, &payload.end_time, tz)?;
    let base = interval::apply_rollover(parsed, tz);

    if base.end <= base.start {
        return Err(AppError::Validation("End time must be after start time".into()));
    }

    let occurrences = expand_occurrences(&base, payload.recurrence.as_ref(), tz)?;
    if occurrences.is_empty() {
        return Err(AppError::Validation("Recurrence rule produces no occurrences".into()));
    }

    let existing = state.reservation_repo.list_by_room(&room.id).await?;
    for occurrence in &occurrences {
        if conflict::has_conflict(occurrence, &room.id, &existing, None, tz) {
            return Err(AppError::Conflict(format!(
                "Room is already booked on {}",
                occurrence.start.with_timezone(&tz).format("%d/%m/%Y")
            )));
        }
    }

    let carries_rule = payload.recurrence.as_ref()
        .is_some_and(|r| r.kind != RecurrenceKind::None);

    let parent = Reservation::new(NewReservationParams {
        room_id: room.id.clone(),
        activity_id: activity.id.clone(),
        start_time: occurrences[0].start,
        end_time: occurrences[0].end,
        title: payload.title.clone(),
        description: payload.description.clone(),
        notes: payload.notes.clone(),
        created_by: user.id.clone(),
        parent_reservation_id: None,
        recurrence: if carries_rule { payload.recurrence.clone() } else { None },
    });

    let mut batch = vec![parent];
    for occurrence in occurrences.iter().skip(1) {
        batch.push(Reservation::new(NewReservationParams {
            room_id: room.id.clone(),
            activity_id: activity.id.clone(),
            start_time: occurrence.start,
            end_time: occurrence.end,
            title: payload.title.clone(),
            description: payload.description.clone(),
            notes: payload.notes.clone(),
            created_by: user.id.clone(),
            parent_reservation_id: Some(batch[0].id.clone()),
            recurrence: None,
        }));
    }

    let created = state.reservation_repo.create_batch(&batch).await?;

    let username = display_name(&state, &user.id).await?;
    state.history_repo.record(&HistoryEntry::new(
        "create",
        "reservation",
        &created[0].id,
        &user.id,
        &username,
        format!("{} occurrence(s) in room '{}'", created.len(), room.name),
    )).await?;

    info!("Reservation created: {} ({} occurrences)", created[0].id, created.len());

    let rooms = HashMap::from([(room.id.clone(), room)]);
    let activities = HashMap::from([(activity.id.clone(), activity)]);
    let body: Vec<ReservationResponse> = created.iter()
        .map(|r| ReservationResponse::from_reservation(r, &rooms, &activities))
        .collect();

    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn list_reservations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListReservationsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tz = state.config.timezone;

    let mut reservations = match &query.room_id {
        Some(room_id) => state.reservation_repo.list_by_room(room_id).await?,
        None => state.reservation_repo.list().await?,
    };

    if let Some(date) = query.date {
        reservations.retain(|r| r.start_time.with_timezone(&tz).date_naive() == date);
    }

    let (rooms, activities) = load_lookup_maps(&state).await?;
    let body: Vec<ReservationResponse> = reservations.iter()
        .map(|r| ReservationResponse::from_reservation(r, &rooms, &activities))
        .collect();

    Ok(Json(body))
}

pub async fn get_reservation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = state.reservation_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Reservation not found".into()))?;

    let (rooms, activities) = load_lookup_maps(&state).await?;
    Ok(Json(ReservationResponse::from_reservation(&reservation, &rooms, &activities)))
}

pub async fn update_reservation(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Query(scope): Query<ScopeQuery>,
    Json(payload): Json<UpdateReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role().can_edit_reservations() {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }

    let tz = state.config.timezone;

    let reservation = state.reservation_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Reservation not found".into()))?;

    let target_id = series::resolve_target(&reservation, scope.scope).to_string();
    let mut target = if target_id == reservation.id {
        reservation
    } else {
        state.reservation_repo.find_by_id(&target_id).await?
            .ok_or(AppError::NotFound("Series parent not found".into()))?
    };

    if let Some(val) = &payload.room_id {
        state.room_repo.find_by_id(val).await?
            .ok_or(AppError::NotFound("Room not found".into()))?;
        target.room_id = val.clone();
    }
    if let Some(val) = &payload.activity_id {
        state.activity_repo.find_by_id(val).await?
            .ok_or(AppError::NotFound("Activity not found".into()))?;
        target.activity_id = val.clone();
    }
    if let Some(val) = payload.title { target.title = Some(val); }
    if let Some(val) = payload.description { target.description = Some(val); }
    if let Some(val) = payload.notes { target.notes = Some(val); }

    if payload.start_time.is_some() || payload.end_time.is_some() {
        let start = match &payload.start_time {
            Some(raw) => interval::parse_instant(raw, tz)?,
            None => target.start_time,
        };
        let end = match &payload.end_time {
            Some(raw) => interval::parse_instant(raw, tz)?,
            None => target.end_time,
        };

        let adjusted = interval::apply_rollover(Interval::new(start, end), tz);
        if adjusted.end <= adjusted.start {
            return Err(AppError::Validation("End time must be after start time".into()));
        }
        target.start_time = adjusted.start;
        target.end_time = adjusted.end;
    }

    let candidate = Interval::new(target.start_time, target.end_time);
    let existing = state.reservation_repo.list_by_room(&target.room_id).await?;
    if conflict::has_conflict(&candidate, &target.room_id, &existing, Some(&target.id), tz) {
        return Err(AppError::Conflict(format!(
            "Room is already booked on {}",
            candidate.start.with_timezone(&tz).format("%d/%m/%Y")
        )));
    }

    let updated = state.reservation_repo.update(&target).await?;

    let username = display_name(&state, &user.id).await?;
    state.history_repo.record(&HistoryEntry::new(
        "update",
        "reservation",
        &updated.id,
        &user.id,
        &username,
        format!("scope: {}", match scope.scope {
            MutationScope::All => "all",
            MutationScope::Single => "single",
        }),
    )).await?;

    info!("Reservation updated: {}", updated.id);

    let (rooms, activities) = load_lookup_maps(&state).await?;
    Ok(Json(ReservationResponse::from_reservation(&updated, &rooms, &activities)))
}

pub async fn delete_reservation(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Query(scope): Query<ScopeQuery>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role().can_edit_reservations() {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }

    let reservation = state.reservation_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Reservation not found".into()))?;

    let deleted = match scope.scope {
        MutationScope::All => {
            let parent_id = series::resolve_target(&reservation, MutationScope::All).to_string();
            state.reservation_repo.delete_series(&parent_id).await?
        }
        MutationScope::Single => {
            state.reservation_repo.delete(&reservation.id).await?;
            1
        }
    };

    let username = display_name(&state, &user.id).await?;
    state.history_repo.record(&HistoryEntry::new(
        "delete",
        "reservation",
        &reservation.id,
        &user.id,
        &username,
        format!("{} occurrence(s) removed", deleted),
    )).await?;

    info!("Reservation deleted: {} ({} rows)", id, deleted);
    Ok(Json(serde_json::json!({"status": "deleted", "count": deleted})))
}

/// Turns a calendar drag into a committed move. Sub-threshold drags come
/// back as `moved: false` so the client treats them as plain clicks.
pub async fn reschedule_reservation(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<RescheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role().can_edit_reservations() {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }
    if payload.cell_height_px <= 0.0 || payload.day_column_width_px <= 0.0 {
        return Err(AppError::Validation("Calendar geometry must be positive".into()));
    }

    let tz = state.config.timezone;

    let mut reservation = state.reservation_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Reservation not found".into()))?;

    let original = Interval::new(reservation.start_time, reservation.end_time);
    let input = DragInput {
        pixel_delta_x: payload.pixel_delta_x,
        pixel_delta_y: payload.pixel_delta_y,
        cell_height_px: payload.cell_height_px,
        day_column_width_px: payload.day_column_width_px,
    };

    let (rooms, activities) = load_lookup_maps(&state).await?;

    match drag::compute_move(&original, &input, tz) {
        DragOutcome::Click => {
            Ok(Json(RescheduleResponse {
                moved: false,
                reservation: ReservationResponse::from_reservation(&reservation, &rooms, &activities),
            }))
        }
        DragOutcome::OutOfHours => {
            Err(AppError::Validation("Reservations must start between 08:00 and midnight".into()))
        }
        DragOutcome::Moved(candidate) => {
            let existing = state.reservation_repo.list_by_room(&reservation.room_id).await?;
            if conflict::has_conflict(&candidate, &reservation.room_id, &existing, Some(&reservation.id), tz) {
                return Err(AppError::Conflict(format!(
                    "Room is already booked on {}",
                    candidate.start.with_timezone(&tz).format("%d/%m/%Y")
                )));
            }

            reservation.start_time = candidate.start;
            reservation.end_time = candidate.end;
            let updated = state.reservation_repo.update(&reservation).await?;

            let username = display_name(&state, &user.id).await?;
            state.history_repo.record(&HistoryEntry::new(
                "reschedule",
                "reservation",
                &updated.id,
                &user.id,
                &username,
                format!("moved to {}", updated.start_time.with_timezone(&tz).format("%d/%m/%Y %H:%M")),
            )).await?;

            info!("Reservation rescheduled: {}", updated.id);

            Ok(Json(RescheduleResponse {
                moved: true,
                reservation: ReservationResponse::from_reservation(&updated, &rooms, &activities),
            }))
        }
    }
}

/// Public endpoint for the lobby display: everything running right now.
pub async fn now_showing(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();
    let current = state.reservation_repo.list_by_range(now, now).await?;

    let (rooms, activities) = load_lookup_maps(&state).await?;
    let body: Vec<ReservationResponse> = current.iter()
        .map(|r| ReservationResponse::from_reservation(r, &rooms, &activities))
        .collect();

    Ok(Json(body))
}

/// Projects the base interval onto every occurrence date of the rule,
/// keeping the wall-clock start/end times and the day offset a rollover
/// may have introduced.
fn expand_occurrences(
    base: &Interval,
    rule: Option<&Recurrence>,
    tz: Tz,
) -> Result<Vec<Interval>, AppError> {
    let Some(rule) = rule.filter(|r| r.kind != RecurrenceKind::None) else {
        return Ok(vec![*base]);
    };

    let start_local = base.start.with_timezone(&tz);
    let end_local = base.end.with_timezone(&tz);
    let start_tod = start_local.time();
    let end_tod = end_local.time();
    let end_day_offset = end_local.date_naive() - start_local.date_naive();

    let dates = recurrence::expand(start_local.date_naive(), rule);

    let mut occurrences = Vec::with_capacity(dates.len());
    for date in dates {
        let start = tz.from_local_datetime(&date.and_time(start_tod)).single()
            .ok_or_else(|| AppError::Parse(format!("Occurrence falls on an invalid local time: {date}")))?;
        let end_date = date + Duration::days(end_day_offset.num_days());
        let end = tz.from_local_datetime(&end_date.and_time(end_tod)).single()
            .ok_or_else(|| AppError::Parse(format!("Occurrence falls on an invalid local time: {end_date}")))?;

        occurrences.push(Interval::new(start.with_timezone(&Utc), end.with_timezone(&Utc)));
    }

    Ok(occurrences)
}

/// The access token only carries the user id; audit entries want the name.
async fn display_name(state: &Arc<AppState>, user_id: &str) -> Result<String, AppError> {
    Ok(state.user_repo.find_by_id(user_id).await?
        .map(|u| u.username)
        .unwrap_or_else(|| user_id.to_string()))
}

async fn load_lookup_maps(
    state: &Arc<AppState>,
) -> Result<(HashMap<String, crate::domain::models::room::Room>, HashMap<String, crate::domain::models::activity::Activity>), AppError> {
    let rooms = state.room_repo.list().await?
        .into_iter()
        .map(|r| (r.id.clone(), r))
        .collect();
    let activities = state.activity_repo.list().await?
        .into_iter()
        .map(|a| (a.id.clone(), a))
        .collect();
    Ok((rooms, activities))
}
