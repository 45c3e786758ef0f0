use axum::{routing::get, Json, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::server::{
    controller::{
        admin::{__path_send_test_email, send_test_email},
        auth::{
            __path_forgot_password, __path_login, __path_logout, __path_me, __path_office_login,
            __path_reset_password, __path_verify_otp, forgot_password, login, logout, me,
            office_login, reset_password, verify_otp,
        },
        category::{
            __path_create_category, __path_delete_category, __path_get_categories,
            __path_get_departments, __path_update_category, create_category, delete_category,
            get_categories, get_departments, update_category,
        },
        event::{
            __path_create_event, __path_delete_event, __path_get_event, __path_get_events,
            __path_update_event, create_event, delete_event, get_event, get_events, update_event,
        },
        health::{__path_health_check, health_check, root},
        realtime::{__path_event_stream, event_stream},
        report::{__path_get_report, get_report},
        user::{
            __path_create_user, __path_delete_user, __path_get_users, __path_update_user,
            create_user, delete_user, get_users, update_user,
        },
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Eventboard API", description = "Department event scheduling backend"),
    tags(
        (name = "auth", description = "Login, logout and password reset"),
        (name = "category", description = "Office roster and departments"),
        (name = "user", description = "User accounts, administrator only"),
        (name = "event", description = "Event booking with participant conflict checks"),
        (name = "realtime", description = "Server-sent schedule change notifications"),
        (name = "report", description = "Spreadsheet and PDF exports"),
        (name = "admin", description = "Administrative utilities"),
        (name = "health", description = "Liveness probe")
    )
)]
struct ApiDoc;

/// Builds every route of the API and serves the generated OpenAPI document at
/// `/api/openapi.json`.
pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(login))
        .routes(routes!(office_login))
        .routes(routes!(logout))
        .routes(routes!(me))
        .routes(routes!(forgot_password))
        .routes(routes!(verify_otp))
        .routes(routes!(reset_password))
        .routes(routes!(get_categories, create_category))
        .routes(routes!(update_category, delete_category))
        .routes(routes!(get_departments))
        .routes(routes!(get_users, create_user))
        .routes(routes!(update_user, delete_user))
        .routes(routes!(get_events, create_event))
        .routes(routes!(event_stream))
        .routes(routes!(get_event, update_event, delete_event))
        .routes(routes!(get_report))
        .routes(routes!(send_test_email))
        .routes(routes!(health_check))
        .split_for_parts();

    router
        .route("/", get(root))
        .route("/api/openapi.json", get(move || async move { Json(api) }))
}
