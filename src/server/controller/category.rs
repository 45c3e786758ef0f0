use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        category::{CategoryDto, CreateCategoryDto, UpdateCategoryDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::category::CategoryParams,
        service::category::CategoryService,
        state::AppState,
    },
};

/// Tag for grouping category endpoints in OpenAPI documentation
pub static CATEGORY_TAG: &str = "category";

/// Get every roster entry.
///
/// Returns all offices ordered by department, then office. Any logged-in actor may read
/// the roster since it is needed to pick event participants.
///
/// # Returns
/// - `200 OK` - All roster entries
/// - `401 Unauthorized` - Not logged in
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = CATEGORY_TAG,
    responses(
        (status = 200, description = "Successfully retrieved categories", body = Vec<CategoryDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_categories(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let categories = CategoryService::new(&state.db).get_all().await?;

    Ok((
        StatusCode::OK,
        Json(
            categories
                .into_iter()
                .map(|c| c.into_dto())
                .collect::<Vec<_>>(),
        ),
    ))
}

/// Create a roster entry.
///
/// # Access Control
/// - Administrators for any department
/// - Department users for their own department
/// - Offices are denied
///
/// # Returns
/// - `201 Created` - Entry created
/// - `400 Bad Request` - A field is missing
/// - `403 Forbidden` - Department not managed by the caller
/// - `409 Conflict` - ID number already in use
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = CATEGORY_TAG,
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Successfully created category", body = CategoryDto),
        (status = 400, description = "Missing field", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Department not managed by the caller", body = ErrorDto),
        (status = 409, description = "ID number already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_category(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateCategoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let params = CategoryParams::from_create_dto(payload)?;

    let category = CategoryService::new(&state.db).create(&actor, params).await?;

    Ok((StatusCode::CREATED, Json(category.into_dto())))
}

/// Update a roster entry.
///
/// Department users must manage both the entry's current and its new department.
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = CATEGORY_TAG,
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Successfully updated category", body = CategoryDto),
        (status = 400, description = "Missing field", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Department not managed by the caller", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 409, description = "ID number already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_category(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCategoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let params = CategoryParams::from_update_dto(payload)?;

    let category = CategoryService::new(&state.db)
        .update(&actor, id, params)
        .await?;

    Ok((StatusCode::OK, Json(category.into_dto())))
}

/// Delete a roster entry.
///
/// Events keep the participant labels they were booked with.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = CATEGORY_TAG,
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted category"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Department not managed by the caller", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_category(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    CategoryService::new(&state.db).delete(&actor, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the department names known to the system.
///
/// The base departments come first, followed by any other department found in the roster.
#[utoipa::path(
    get,
    path = "/api/departments",
    tag = CATEGORY_TAG,
    responses(
        (status = 200, description = "Department names", body = Vec<String>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_departments(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let departments = CategoryService::new(&state.db).get_departments().await?;

    Ok((StatusCode::OK, Json(departments)))
}
