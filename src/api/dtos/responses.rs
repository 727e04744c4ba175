use crate::domain::models::{activity::Activity, reservation::{Recurrence, Reservation}, room::Room};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: String,
    pub name: String,
    pub capacity: i32,
    pub color: String,
    pub equipment: Vec<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Room> for RoomResponse {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.clone(),
            name: room.name.clone(),
            capacity: room.capacity,
            color: room.color.clone(),
            equipment: room.equipment(),
            created_by: room.created_by.clone(),
            created_at: room.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub instructor: String,
    pub category: String,
    pub requirements: Vec<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Activity> for ActivityResponse {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id.clone(),
            name: activity.name.clone(),
            description: activity.description.clone(),
            instructor: activity.instructor.clone(),
            category: activity.category.clone(),
            requirements: activity.requirements(),
            created_by: activity.created_by.clone(),
            created_at: activity.created_at,
        }
    }
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: String,
    pub name: String,
    pub color: String,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub id: String,
    pub name: String,
    pub instructor: String,
    pub category: String,
}

/// Reservation as served to the calendar: the room/activity ids stay
/// authoritative, the embedded summaries are a denormalized read-time copy
/// for display.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: String,
    pub room_id: String,
    pub activity_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub parent_reservation_id: Option<String>,
    pub recurrence: Option<Recurrence>,
    pub room: Option<RoomSummary>,
    pub activity: Option<ActivitySummary>,
}

impl ReservationResponse {
    pub fn from_reservation(
        reservation: &Reservation,
        rooms: &HashMap<String, Room>,
        activities: &HashMap<String, Activity>,
    ) -> Self {
        Self {
            id: reservation.id.clone(),
            room_id: reservation.room_id.clone(),
            activity_id: reservation.activity_id.clone(),
            start_time: reservation.start_time,
            end_time: reservation.end_time,
            title: reservation.title.clone(),
            description: reservation.description.clone(),
            notes: reservation.notes.clone(),
            created_by: reservation.created_by.clone(),
            created_at: reservation.created_at,
            parent_reservation_id: reservation.parent_reservation_id.clone(),
            recurrence: reservation.recurrence(),
            room: rooms.get(&reservation.room_id).map(|r| RoomSummary {
                id: r.id.clone(),
                name: r.name.clone(),
                color: r.color.clone(),
            }),
            activity: activities.get(&reservation.activity_id).map(|a| ActivitySummary {
                id: a.id.clone(),
                name: a.name.clone(),
                instructor: a.instructor.clone(),
                category: a.category.clone(),
            }),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleResponse {
    pub moved: bool,
    pub reservation: ReservationResponse,
}
