//! The role gate.
//!
//! Runs after [`require_auth`](crate::middleware::auth::require_auth) and
//! compares the stored role of the caller with the single role a route
//! declares. Roles are disjoint: an admin is not a student.

use axum::{extract::Request, middleware::Next, response::Response};
use coursehub_auth::{AuthError, UserRole};
use tracing::warn;

use crate::metrics::track_auth_rejection;
use crate::middleware::auth::AuthUser;

/// Admits `user` only if it exists and holds exactly `required`.
pub fn check_role(user: Option<&AuthUser>, required: UserRole) -> Result<&AuthUser, AuthError> {
    let user = user.ok_or(AuthError::PrecedingAuthMissing)?;

    if user.role != required {
        warn!(
            user.id = %user.id,
            user.role = %user.role,
            required_role = %required,
            "Role check failed"
        );
        return Err(AuthError::Forbidden(required));
    }

    Ok(user)
}

pub async fn require_role(
    req: Request,
    next: Next,
    required: UserRole,
) -> Result<Response, AuthError> {
    if let Err(err) = check_role(req.extensions().get::<AuthUser>(), required) {
        track_auth_rejection(err.code());
        return Err(err);
    }

    Ok(next.run(req).await)
}

/// ```rust,ignore
/// Router::new()
///     .route("/", post(create_course))
///     .route_layer(middleware::from_fn(require_admin))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
/// ```
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AuthError> {
    require_role(req, next, UserRole::Admin).await
}

pub async fn require_student(req: Request, next: Next) -> Result<Response, AuthError> {
    require_role(req, next, UserRole::Student).await
}
