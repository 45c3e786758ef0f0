use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::event::BookingConflictDto;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

/// Error body returned when a booking collides with existing events.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConflictErrorDto {
    pub error: String,
    pub conflicts: Vec<BookingConflictDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
