use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventDto {
    pub id: i32,
    pub program: String,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub purpose: String,
    pub participants: Vec<String>,
    pub departments: Vec<String>,
    pub status: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Create or update payload for an event.
///
/// Dates are `YYYY-MM-DD`, times `HH:MM` (seconds optional) in the schedule's local time.
/// When the end falls on or before the start, `crosses_midnight` moves the end to the
/// following day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct EventPayloadDto {
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default)]
    pub crosses_midnight: bool,
}

/// An existing event that blocks a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingConflictDto {
    pub event_id: i32,
    pub program: String,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    /// Participants shared with the rejected booking, as stored on the existing event.
    pub participants: Vec<String>,
}
