use axum::{Json, extract::State, http::StatusCode};
use coursehub_core::{ApiResponse, AppError, ErrorBody, MessageResponse};
use coursehub_models::{Favourite, FavouriteCheckResponse, FavouriteWithCourse};
use tracing::instrument;
use uuid::Uuid;

use super::service::FavouriteService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedPath;

/// Add a course to the caller's favourites
#[utoipa::path(
    post,
    path = "/api/favourites/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 201, description = "Course added to favourites", body = ApiResponse<Favourite>),
        (status = 400, description = "Already a favourite or invalid ID", body = ErrorBody),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody),
        (status = 403, description = "Student role required", body = ErrorBody),
        (status = 404, description = "Course not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Favourites"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id))]
pub async fn add_favourite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(course_id): ValidatedPath<Uuid>,
) -> Result<(StatusCode, Json<ApiResponse<Favourite>>), AppError> {
    let favourite = FavouriteService::add_favourite(&state.db, auth_user.id, course_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(favourite).with_message("Course added to favourites")),
    ))
}

/// Remove a course from the caller's favourites
#[utoipa::path(
    delete,
    path = "/api/favourites/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course removed from favourites", body = MessageResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody),
        (status = 403, description = "Student role required", body = ErrorBody),
        (status = 404, description = "Course is not in your favourites", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Favourites"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id))]
pub async fn remove_favourite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(course_id): ValidatedPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    FavouriteService::remove_favourite(&state.db, auth_user.id, course_id).await?;
    Ok(Json(MessageResponse::new("Course removed from favourites")))
}

/// The caller's favourites, most recent first
#[utoipa::path(
    get,
    path = "/api/favourites/my",
    responses(
        (status = 200, description = "Favourites with course details", body = ApiResponse<Vec<FavouriteWithCourse>>),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody),
        (status = 403, description = "Student role required", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Favourites"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id))]
pub async fn get_my_favourites(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ApiResponse<Vec<FavouriteWithCourse>>>, AppError> {
    let favourites = FavouriteService::get_my_favourites(&state.db, auth_user.id).await?;
    Ok(Json(ApiResponse::list(favourites)))
}

/// Whether a course is among the caller's favourites
#[utoipa::path(
    get,
    path = "/api/favourites/{course_id}/check",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Favourite status", body = FavouriteCheckResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody),
        (status = 403, description = "Student role required", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Favourites"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id))]
pub async fn check_favourite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(course_id): ValidatedPath<Uuid>,
) -> Result<Json<FavouriteCheckResponse>, AppError> {
    let is_favourite = FavouriteService::is_favourite(&state.db, auth_user.id, course_id).await?;
    Ok(Json(FavouriteCheckResponse::new(is_favourite)))
}
