use crate::domain::models::reservation::Recurrence;
use crate::domain::services::series::MutationScope;
use chrono::NaiveDate;
use serde::Deserialize;

// The calendar frontend speaks camelCase JSON; every wire DTO keeps that.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub name: String,
    pub capacity: i32,
    pub color: Option<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub color: Option<String>,
    pub equipment: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub requirements: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub instructor: Option<String>,
    pub category: Option<String>,
    pub requirements: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
    pub role: String,
}

/// Start/end accept full ISO-8601 or `DD/MM/YYYY HH:mm`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub start_time: String,
    pub end_time: String,
    pub room_id: String,
    pub activity_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub recurrence: Option<Recurrence>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub room_id: Option<String>,
    pub activity_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

/// Raw pointer-drag delta plus the geometry of the view it happened in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleRequest {
    pub pixel_delta_x: f64,
    pub pixel_delta_y: f64,
    pub cell_height_px: f64,
    pub day_column_width_px: f64,
}

#[derive(Deserialize, Default)]
pub struct ScopeQuery {
    #[serde(default)]
    pub scope: MutationScope,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReservationsQuery {
    pub room_id: Option<String>,
    pub date: Option<NaiveDate>,
}
