//! The authentication gate.
//!
//! [`require_auth`] runs in front of every protected route. It checks the
//! `Authorization` header, verifies the token, then re-reads the user from the
//! database so that deleted users and changed roles take effect immediately.
//! On success the fresh [`AuthUser`] is stored in the request extensions where
//! the role gate and handlers pick it up.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use coursehub_auth::{AuthError, UserRole, verify_token};
use serde::Serialize;
use sqlx::FromRow;
use tracing::{debug, error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::metrics::track_auth_rejection;
use crate::state::AppState;

/// The authenticated caller, as currently stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub role: UserRole,
}

/// Returns the token carried by an `Authorization: Bearer <token>` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(AuthError::missing_header)?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(AuthError::missing_header)?;

    if token.is_empty() {
        return Err(AuthError::empty_token());
    }

    Ok(token)
}

/// Resolves the request headers to a stored user.
///
/// Header and token checks run before the database round-trip.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, AuthError> {
    let token = extract_bearer_token(headers)?;
    let claims = verify_token(token, &state.jwt_config)?;
    let user_id = claims.user_id()?;

    let user = sqlx::query_as::<_, AuthUser>(
        "SELECT id, username, email, role FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, user.id = %user_id, "Database error resolving authenticated user");
        AuthError::internal(e)
    })?;

    let user = user.ok_or_else(|| {
        warn!(user.id = %user_id, "Token subject no longer exists");
        AuthError::unknown_user()
    })?;

    debug!(user.id = %user.id, user.role = %user.role, "Request authenticated");
    Ok(user)
}

/// Middleware admitting only requests that carry a valid token for an
/// existing user.
///
/// ```rust,ignore
/// Router::new()
///     .route("/me", get(me))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
/// ```
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    match authenticate(&state, req.headers()).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(err) => {
            track_auth_rejection(err.code());
            Err(err)
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AuthError::PrecedingAuthMissing)
    }
}
