use axum::http::StatusCode;

/// Tag for grouping health endpoints in OpenAPI documentation
pub static HEALTH_TAG: &str = "health";

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Server is running")
    ),
)]
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

pub async fn root() -> &'static str {
    "Backend API is running!"
}
