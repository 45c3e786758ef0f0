use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        auth::{ActorDto, ForgotPasswordDto, LoginDto, OfficeLoginDto, ResetPasswordDto, VerifyOtpDto},
        category::CategoryDto,
        user::UserDto,
    },
    server::{
        error::AppError,
        middleware::{
            auth::AuthGuard,
            session::{AuthSession, SessionActor},
        },
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Log in with employee number and password.
///
/// Verifies the password against the stored argon2 hash and stores the user in the
/// session.
///
/// # Returns
/// - `200 OK` - Logged in, returns the user
/// - `400 Bad Request` - Employee number or password missing
/// - `401 Unauthorized` - Unknown employee number or wrong password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 400, description = "Missing employee number or password", body = ErrorDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(&state.db, state.mailer.as_ref(), state.otp_ttl);

    let user = service
        .login(&payload.employee_number, &payload.password)
        .await?;

    AuthSession::new(&session)
        .set_actor(SessionActor::User(user.id))
        .await?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Log in as an office using the ID number of its roster entry.
///
/// # Returns
/// - `200 OK` - Logged in, returns the roster entry
/// - `400 Bad Request` - ID number missing
/// - `404 Not Found` - No roster entry with that ID number
#[utoipa::path(
    post,
    path = "/api/auth/office-login",
    tag = AUTH_TAG,
    request_body = OfficeLoginDto,
    responses(
        (status = 200, description = "Logged in as office", body = CategoryDto),
        (status = 400, description = "Missing ID number", body = ErrorDto),
        (status = 404, description = "Office not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn office_login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<OfficeLoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(&state.db, state.mailer.as_ref(), state.otp_ttl);

    let office = service.office_login(&payload.id_number).await?;

    AuthSession::new(&session)
        .set_actor(SessionActor::Office(office.id))
        .await?;

    tracing::info!(category_id = office.id, "Office logged in");

    Ok((StatusCode::OK, Json(office.into_dto())))
}

/// Log out and clear the session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out", body = MessageDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await;

    Ok((StatusCode::OK, Json(MessageDto::new("Logged out."))))
}

/// Get the logged-in actor.
///
/// # Returns
/// - `200 OK` - The user account or office that is logged in
/// - `401 Unauthorized` - Nobody is logged in, or the account was deleted
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current actor", body = ActorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(actor.into_dto())))
}

/// Request a password reset code.
///
/// Mails a six digit one-time code to the account with the given email.
///
/// # Returns
/// - `200 OK` - Code sent
/// - `400 Bad Request` - Email missing
/// - `404 Not Found` - No account with that email
/// - `500 Internal Server Error` - Code could not be mailed
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = AUTH_TAG,
    request_body = ForgotPasswordDto,
    responses(
        (status = 200, description = "Reset code sent", body = MessageDto),
        (status = 400, description = "Missing email", body = ErrorDto),
        (status = 404, description = "No account with that email", body = ErrorDto),
        (status = 500, description = "Mail delivery failed", body = ErrorDto)
    ),
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthService::new(&state.db, state.mailer.as_ref(), state.otp_ttl)
        .forgot_password(&payload.email)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("OTP sent to your email.")),
    ))
}

/// Check a password reset code without consuming it.
#[utoipa::path(
    post,
    path = "/api/auth/verify-otp",
    tag = AUTH_TAG,
    request_body = VerifyOtpDto,
    responses(
        (status = 200, description = "Code is valid", body = MessageDto),
        (status = 400, description = "Invalid or expired code", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOtpDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthService::new(&state.db, state.mailer.as_ref(), state.otp_ttl)
        .verify_otp(&payload.email, &payload.otp_code)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("OTP verified."))))
}

/// Set a new password using a mailed reset code.
///
/// The password is changed even when the confirmation mail cannot be sent; the
/// response message then carries a warning.
///
/// # Returns
/// - `200 OK` - Password changed
/// - `400 Bad Request` - Field missing, or invalid or expired code
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    tag = AUTH_TAG,
    request_body = ResetPasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageDto),
        (status = 400, description = "Missing field, or invalid or expired code", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = AuthService::new(&state.db, state.mailer.as_ref(), state.otp_ttl)
        .reset_password(&payload.email, &payload.otp_code, &payload.new_password)
        .await?;

    let message = if outcome.notice_sent {
        "Password has been reset successfully."
    } else {
        "Password has been reset, but the confirmation email could not be sent."
    };

    Ok((StatusCode::OK, Json(MessageDto::new(message))))
}
