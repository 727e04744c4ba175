use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// A single dated occurrence on the calendar. The first occurrence of a
/// recurring series carries the serialized recurrence rule; every later
/// occurrence points back at it through `parent_reservation_id`.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Reservation {
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
    pub recurrence_json: Option<String>,
}

pub struct NewReservationParams {
    pub room_id: String,
    pub activity_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub created_by: String,
    pub parent_reservation_id: Option<String>,
    pub recurrence: Option<Recurrence>,
}

impl Reservation {
    pub fn new(params: NewReservationParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            room_id: params.room_id,
            activity_id: params.activity_id,
            start_time: params.start_time,
            end_time: params.end_time,
            title: params.title,
            description: params.description,
            notes: params.notes,
            created_by: params.created_by,
            created_at: Utc::now(),
            parent_reservation_id: params.parent_reservation_id,
            recurrence_json: params.recurrence.as_ref()
                .map(|r| serde_json::to_string(r).unwrap_or_default()),
        }
    }

    pub fn recurrence(&self) -> Option<Recurrence> {
        self.recurrence_json.as_ref()
            .and_then(|json| serde_json::from_str(json).ok())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    None,
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    #[serde(rename = "type")]
    pub kind: RecurrenceKind,
    #[serde(default = "default_interval")]
    pub interval: u32,
    pub end_date: NaiveDate,
    /// Weekday indices for weekly rules, 0 = Sunday.
    #[serde(default)]
    pub days_of_week: Vec<u8>,
}

fn default_interval() -> u32 {
    1
}
