use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use coursehub_core::{ApiResponse, AppError, ErrorBody, MessageResponse};
use coursehub_models::{Course, CourseFilterParams, CreateCourseDto, UpdateCourseDto};
use tracing::instrument;
use uuid::Uuid;

use super::service::CourseService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

/// List courses, newest first
#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseFilterParams),
    responses(
        (status = 200, description = "Matching courses", body = ApiResponse<Vec<Course>>),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(filters): Query<CourseFilterParams>,
) -> Result<Json<ApiResponse<Vec<Course>>>, AppError> {
    let courses = CourseService::get_courses(&state.db, filters).await?;
    Ok(Json(ApiResponse::list(courses)))
}

/// Get a course by ID
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course found", body = ApiResponse<Course>),
        (status = 400, description = "Invalid ID format", body = ErrorBody),
        (status = 404, description = "Course not found", body = ErrorBody)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<ApiResponse<Course>>, AppError> {
    let course = CourseService::get_course(&state.db, id).await?;
    Ok(Json(ApiResponse::ok(course)))
}

/// Create a course taught by the calling admin
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = ApiResponse<Course>),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.id))]
pub async fn create_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<ApiResponse<Course>>), AppError> {
    let course = CourseService::create_course(&state.db, auth_user.id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(course).with_message("Course created successfully")),
    ))
}

/// Update some or all fields of a course
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = ApiResponse<Course>),
        (status = 400, description = "Validation error or no fields to update", body = ErrorBody),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody),
        (status = 404, description = "Course not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<ApiResponse<Course>>, AppError> {
    let course = CourseService::update_course(&state.db, id, dto).await?;
    Ok(Json(
        ApiResponse::ok(course).with_message("Course updated successfully"),
    ))
}

/// Delete a course with its enrollments and favourites
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody),
        (status = 404, description = "Course not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    CourseService::delete_course(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Course deleted successfully")))
}
