use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::api::{ErrorDto, MessageDto},
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::mail::{Mail, Mailer},
        state::AppState,
    },
};

/// Tag for grouping admin endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

#[derive(Deserialize)]
pub struct TestEmailParams {
    pub to: Option<String>,
}

/// Send a test email to check the mail configuration.
///
/// Defaults to the administrator's own address when `to` is omitted.
#[utoipa::path(
    get,
    path = "/api/admin/test-email",
    tag = ADMIN_TAG,
    params(
        ("to" = Option<String>, Query, description = "Recipient, defaults to the caller's email")
    ),
    responses(
        (status = 200, description = "Test email sent", body = MessageDto),
        (status = 400, description = "No recipient", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Administrator access required", body = ErrorDto),
        (status = 500, description = "Mail delivery failed", body = ErrorDto)
    ),
)]
pub async fn send_test_email(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<TestEmailParams>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let to = params
        .to
        .map(|to| to.trim().to_string())
        .filter(|to| !to.is_empty())
        .or_else(|| actor.user().map(|admin| admin.email.clone()))
        .ok_or_else(|| AppError::BadRequest("Recipient is required.".to_string()))?;

    state.mailer.send(Mail::test(&to)).await?;

    tracing::info!(to = %to, "Test email sent");

    Ok((
        StatusCode::OK,
        Json(MessageDto::new(format!("Test email sent to {}.", to))),
    ))
}
