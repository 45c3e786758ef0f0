use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No actor stored in the session.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("No user in session")]
    UserNotInSession,

    /// The session references an account that no longer exists.
    ///
    /// Happens when a user or roster entry is deleted while its session is still alive.
    /// Results in a 401 Unauthorized response.
    #[error("Session references missing {0}")]
    UserNotInDatabase(String),

    /// Unknown employee number or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The actor is authenticated but not allowed to perform the operation.
    ///
    /// The message is returned to the client. Results in a 403 Forbidden response.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// One-time password unknown, mismatched or expired.
    ///
    /// Results in a 400 Bad Request response.
    #[error("Invalid or expired OTP")]
    InvalidOtp,
}

/// Converts authentication errors into HTTP responses.
///
/// - `UserNotInSession` / `UserNotInDatabase` → 401 with "Not logged in"
/// - `InvalidCredentials` → 401 with "Invalid credentials"
/// - `AccessDenied` → 403 with the denial reason
/// - `InvalidOtp` → 400 with "Invalid or expired OTP"
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, error) = match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Not logged in".to_string())
            }
            Self::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            Self::AccessDenied(reason) => (StatusCode::FORBIDDEN, reason),
            Self::InvalidOtp => (StatusCode::BAD_REQUEST, "Invalid or expired OTP".to_string()),
        };

        (status, Json(ErrorDto { error })).into_response()
    }
}
