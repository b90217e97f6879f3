//! Rejection taxonomy for the auth and role gates.
//!
//! | Kind                   | Status | `code`                   |
//! |------------------------|--------|--------------------------|
//! | `MissingCredential`    | 401    | `missing_credential`     |
//! | `InvalidCredential`    | 401    | `invalid_credential`     |
//! | `ExpiredCredential`    | 401    | `expired_credential`     |
//! | `PrecedingAuthMissing` | 401    | `preceding_auth_missing` |
//! | `Forbidden`            | 403    | `forbidden`              |
//! | `InternalFailure`      | 500    | `internal_failure`       |
//!
//! Only `InternalFailure` is worth retrying; every other kind is deterministic
//! for the same token and store state.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use coursehub_core::ErrorBody;
use thiserror::Error;

use crate::role::UserRole;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No usable `Authorization: Bearer <token>` header.
    #[error("{0}")]
    MissingCredential(&'static str),

    /// Bad signature, malformed token, or a subject that no longer exists.
    #[error("{0}")]
    InvalidCredential(&'static str),

    /// Signature is fine but `exp` is in the past.
    #[error("Token has expired")]
    ExpiredCredential,

    /// Authenticated, but the role does not match the route's role.
    #[error("Access denied. {} role required.", .0.label())]
    Forbidden(UserRole),

    /// The role gate ran without the auth gate in front of it.
    #[error("Authentication required. Use the authentication gate first.")]
    PrecedingAuthMissing,

    /// The credential store could not be queried.
    #[error("Internal server error during authentication")]
    InternalFailure(String),
}

impl AuthError {
    pub fn missing_header() -> Self {
        AuthError::MissingCredential(
            "No token provided. Authorization header must be in format: Bearer <token>",
        )
    }

    pub fn empty_token() -> Self {
        AuthError::MissingCredential("No token provided")
    }

    pub fn invalid_token() -> Self {
        AuthError::InvalidCredential("Invalid token")
    }

    pub fn unknown_user() -> Self {
        AuthError::InvalidCredential("User not found. Token is invalid.")
    }

    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        AuthError::InternalFailure(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential(_)
            | AuthError::InvalidCredential(_)
            | AuthError::ExpiredCredential
            | AuthError::PrecedingAuthMissing => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthError::InternalFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable kind, sent to clients as `code`.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential(_) => "missing_credential",
            AuthError::InvalidCredential(_) => "invalid_credential",
            AuthError::ExpiredCredential => "expired_credential",
            AuthError::Forbidden(_) => "forbidden",
            AuthError::PrecedingAuthMissing => "preceding_auth_missing",
            AuthError::InternalFailure(_) => "internal_failure",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, AuthError::InternalFailure(_))
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::InternalFailure(detail) => {
                tracing::error!(error = %detail, "Auth gate failed to reach the credential store");
            }
            AuthError::PrecedingAuthMissing => {
                tracing::error!("Role gate mounted without an auth gate in front of it");
            }
            _ => {}
        }

        ErrorBody::new(self.to_string())
            .with_code(self.code())
            .into_response_with(self.status())
    }
}
