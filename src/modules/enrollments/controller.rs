use axum::{Json, extract::State, http::StatusCode};
use coursehub_core::{ApiResponse, AppError, ErrorBody};
use coursehub_models::{Enrollment, EnrollmentWithCourse, UpdateProgressDto};
use tracing::instrument;
use uuid::Uuid;

use super::service::EnrollmentService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{JsonBody, ValidatedPath};

/// Enroll the calling student in a course
#[utoipa::path(
    post,
    path = "/api/enrollments/{id}",
    params(("id" = Uuid, Path, description = "ID of the course to enroll in")),
    responses(
        (status = 201, description = "Enrolled", body = ApiResponse<Enrollment>),
        (status = 400, description = "Already enrolled or invalid ID", body = ErrorBody),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody),
        (status = 403, description = "Student role required", body = ErrorBody),
        (status = 404, description = "Course not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id))]
pub async fn enroll_in_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(course_id): ValidatedPath<Uuid>,
) -> Result<(StatusCode, Json<ApiResponse<Enrollment>>), AppError> {
    let enrollment = EnrollmentService::enroll(&state.db, auth_user.id, course_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(enrollment).with_message("Successfully enrolled in course")),
    ))
}

/// The calling student's enrollments, most recent first
#[utoipa::path(
    get,
    path = "/api/enrollments/my",
    responses(
        (status = 200, description = "Enrollments with course details", body = ApiResponse<Vec<EnrollmentWithCourse>>),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody),
        (status = 403, description = "Student role required", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id))]
pub async fn get_my_enrollments(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ApiResponse<Vec<EnrollmentWithCourse>>>, AppError> {
    let enrollments = EnrollmentService::get_my_enrollments(&state.db, auth_user.id).await?;
    Ok(Json(ApiResponse::list(enrollments)))
}

/// Update progress on one of the caller's enrollments
#[utoipa::path(
    put,
    path = "/api/enrollments/{id}/progress",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    request_body = UpdateProgressDto,
    responses(
        (status = 200, description = "Enrollment updated", body = ApiResponse<Enrollment>),
        (status = 400, description = "Progress out of range or no fields to update", body = ErrorBody),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody),
        (status = 403, description = "Student role required", body = ErrorBody),
        (status = 404, description = "Enrollment not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.id))]
pub async fn update_progress(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
    JsonBody(dto): JsonBody<UpdateProgressDto>,
) -> Result<Json<ApiResponse<Enrollment>>, AppError> {
    let enrollment = EnrollmentService::update_progress(&state.db, auth_user.id, id, dto).await?;
    Ok(Json(
        ApiResponse::ok(enrollment).with_message("Enrollment updated successfully"),
    ))
}
