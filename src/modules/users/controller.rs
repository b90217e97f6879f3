use axum::{Json, extract::State};
use coursehub_core::{ApiResponse, AppError, ErrorBody, MessageResponse};
use coursehub_models::User;
use tracing::instrument;
use uuid::Uuid;

use super::service::UserService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedPath;

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List of users", body = ApiResponse<Vec<User>>),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<User>>>, AppError> {
    let users = UserService::get_users(&state.db).await?;
    Ok(Json(ApiResponse::list(users)))
}

/// Delete another user's account
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Cannot delete own account or invalid ID", body = ErrorBody),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::delete_user(&state.db, auth_user.id, id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
