use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::{ConflictErrorDto, ErrorDto},
    server::model::event::BookingConflict,
};

#[derive(Error, Debug)]
pub enum BookingError {
    /// One or more existing events overlap the requested window and share a participant.
    ///
    /// Results in a 409 Conflict response listing every blocking event.
    #[error("Booking conflicts with {} existing event(s)", .0.len())]
    Conflict(Vec<BookingConflict>),

    /// The requested window is empty or inverted.
    ///
    /// Results in a 400 Bad Request response.
    #[error("{0}")]
    InvalidRange(String),
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        match self {
            Self::Conflict(conflicts) => {
                let participants: Vec<String> = conflicts
                    .iter()
                    .flat_map(|c| c.participants.iter().cloned())
                    .collect();

                (
                    StatusCode::CONFLICT,
                    Json(ConflictErrorDto {
                        error: format!(
                            "Participant(s) already booked at this time: {}",
                            participants.join(", ")
                        ),
                        conflicts: conflicts.into_iter().map(|c| c.into_dto()).collect(),
                    }),
                )
                    .into_response()
            }
            Self::InvalidRange(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
        }
    }
}
