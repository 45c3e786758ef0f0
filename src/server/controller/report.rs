use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::api::ErrorDto,
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        service::report::{ReportRequest, ReportService},
        state::AppState,
    },
};

/// Tag for grouping report endpoints in OpenAPI documentation
pub static REPORT_TAG: &str = "report";

#[derive(Deserialize)]
pub struct ReportParams {
    pub department: Option<String>,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    pub format: Option<String>,
}

/// Download a weekly or monthly report.
///
/// Weekly reports take `start` and `end` as dates. Monthly reports take the month
/// (1-12) as `start` and the year as `end`. The workbook holds the roster, the users and
/// the events of the period; the PDF holds the events only.
///
/// # Access Control
/// - Administrators for any department or `All`
/// - Department users for their own department, `All` is narrowed to it
/// - Offices are denied
#[utoipa::path(
    get,
    path = "/api/reports/{kind}",
    tag = REPORT_TAG,
    params(
        ("kind" = String, Path, description = "`weekly` or `monthly`"),
        ("department" = Option<String>, Query, description = "Department, default `All`"),
        ("start" = String, Query, description = "Weekly: first day. Monthly: month 1-12"),
        ("end" = String, Query, description = "Weekly: last day. Monthly: year"),
        ("format" = Option<String>, Query, description = "`xlsx` (default) or `pdf`")
    ),
    responses(
        (status = 200, description = "Report file", content_type = "application/octet-stream"),
        (status = 400, description = "Unknown type or format, or invalid range", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Department not available to the caller", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_report(
    State(state): State<AppState>,
    session: Session,
    Path(kind): Path<String>,
    Query(params): Query<ReportParams>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let request = ReportRequest {
        kind,
        department: params.department,
        start: params.start,
        end: params.end,
        format: params.format,
    };

    let file = ReportService::new(&state.db).generate(&actor, request).await?;

    tracing::info!(filename = %file.filename, bytes = file.bytes.len(), "Report generated");

    let headers = [
        (header::CONTENT_TYPE, file.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", file.filename),
        ),
    ];

    Ok((StatusCode::OK, headers, file.bytes))
}
