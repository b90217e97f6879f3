use axum::{Json, extract::State, http::StatusCode};
use coursehub_core::{ApiResponse, AppError, ErrorBody};
use coursehub_models::{AuthPayload, LoginRequest, RegisterRequest};
use tracing::instrument;

use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new admin or student account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<AuthPayload>),
        (status = 400, description = "Validation error or user already exists", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthPayload>>), AppError> {
    let payload = AuthService::register_user(&state.db, dto, &state.jwt_config).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(payload).with_message("User registered successfully")),
    ))
}

/// Exchange email and password for an access token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthPayload>),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Invalid email or password", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthPayload>>, AppError> {
    let payload = AuthService::login_user(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(ApiResponse::ok(payload).with_message("Login successful")))
}

/// The authenticated caller, as currently stored
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<AuthUser>),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(auth_user), fields(user.id = %auth_user.id))]
pub async fn get_me(auth_user: AuthUser) -> Json<ApiResponse<AuthUser>> {
    Json(ApiResponse::ok(auth_user))
}
