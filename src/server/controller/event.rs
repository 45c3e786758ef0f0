use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ConflictErrorDto, ErrorDto},
        event::{EventDto, EventPayloadDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            event::{EventFilter, EventParams},
            report::ALL_DEPARTMENTS,
        },
        service::event::EventService,
        state::AppState,
        util::parse::parse_date,
    },
};

/// Tag for grouping event endpoints in OpenAPI documentation
pub static EVENT_TAG: &str = "event";

#[derive(Deserialize)]
pub struct EventListParams {
    pub department: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl EventListParams {
    /// Blank values and the `All` department mean no filter.
    fn into_filter(self) -> Result<EventFilter, AppError> {
        let department = self
            .department
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty() && !d.eq_ignore_ascii_case(ALL_DEPARTMENTS));

        let from = match self.from.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Some(parse_date("from", value)?),
            _ => None,
        };
        let to = match self.to.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Some(parse_date("to", value)?),
            _ => None,
        };

        Ok(EventFilter {
            department,
            from,
            to,
        })
    }
}

/// List events ordered by start time.
///
/// # Arguments
/// - `department` - Only events tagged with this department; `All` lists every event
/// - `from` - Only events ending on or after this day
/// - `to` - Only events starting on or before this day
#[utoipa::path(
    get,
    path = "/api/events",
    tag = EVENT_TAG,
    params(
        ("department" = Option<String>, Query, description = "Department filter, `All` for every department"),
        ("from" = Option<String>, Query, description = "First day, YYYY-MM-DD"),
        ("to" = Option<String>, Query, description = "Last day, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Successfully retrieved events", body = Vec<EventDto>),
        (status = 400, description = "Malformed date", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_events(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<EventListParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let filter = params.into_filter()?;

    let events = service(&state).list(&filter).await?;

    Ok((
        StatusCode::OK,
        Json(events.into_iter().map(|e| e.into_dto()).collect::<Vec<_>>()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = EVENT_TAG,
    params(
        ("id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved event", body = EventDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_event(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let event = service(&state).get(id).await?;

    Ok((StatusCode::OK, Json(event.into_dto())))
}

/// Book an event.
///
/// Rejects the booking when any participant is already booked for an overlapping
/// time. Department users may only book for their own department. Offices always book
/// as themselves for their own department.
///
/// # Returns
/// - `201 Created` - Event booked
/// - `400 Bad Request` - Missing field, malformed date or time, or empty range
/// - `403 Forbidden` - Department not managed by the caller
/// - `409 Conflict` - A participant is already booked, with the blocking events
#[utoipa::path(
    post,
    path = "/api/events",
    tag = EVENT_TAG,
    request_body = EventPayloadDto,
    responses(
        (status = 201, description = "Successfully booked event", body = EventDto),
        (status = 400, description = "Invalid event data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Department not managed by the caller", body = ErrorDto),
        (status = 409, description = "Participant already booked", body = ConflictErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_event(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<EventPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let params = EventParams::from_dto(payload)?;

    let event = service(&state).create(&actor, params).await?;

    Ok((StatusCode::CREATED, Json(event.into_dto())))
}

/// Edit an event.
///
/// The event never conflicts with itself. Status is derived again and the reminder is
/// re-armed.
#[utoipa::path(
    put,
    path = "/api/events/{id}",
    tag = EVENT_TAG,
    params(
        ("id" = i32, Path, description = "Event ID")
    ),
    request_body = EventPayloadDto,
    responses(
        (status = 200, description = "Successfully updated event", body = EventDto),
        (status = 400, description = "Invalid event data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Event not editable by the caller", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 409, description = "Participant already booked", body = ConflictErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_event(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<EventPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let params = EventParams::from_dto(payload)?;

    let event = service(&state).update(&actor, id, params).await?;

    Ok((StatusCode::OK, Json(event.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    tag = EVENT_TAG,
    params(
        ("id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted event"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Event not editable by the caller", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_event(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    service(&state).delete(&actor, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn service(state: &AppState) -> EventService<'_> {
    EventService::new(&state.db, &state.booking_lock, &state.notifier, state.clock)
}
