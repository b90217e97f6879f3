//! Registration and login payloads.

use std::borrow::Cow;

use coursehub_auth::{IssuedToken, UserRole};
use coursehub_core::serde::{deserialize_email, deserialize_trimmed};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::users::User;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(
        length(
            min = 3,
            max = 50,
            message = "Username must be between 3 and 50 characters"
        ),
        custom(function = "validate_username")
    )]
    #[schema(example = "alice_01")]
    pub username: String,

    #[serde(deserialize_with = "deserialize_email")]
    #[validate(email(message = "Please provide a valid email address"))]
    #[schema(example = "alice@example.com")]
    pub email: String,

    #[validate(
        length(min = 6, message = "Password must be at least 6 characters long"),
        custom(function = "validate_password_strength")
    )]
    #[schema(example = "Secret123")]
    pub password: String,

    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(deserialize_with = "deserialize_email")]
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// `data` of a successful register or login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

impl AuthPayload {
    pub fn new(user: User, issued: IssuedToken) -> Self {
        Self {
            user,
            token: issued.token,
            expires_in: issued.expires_in,
        }
    }
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Ok(());
    }

    Err(ValidationError::new("username_charset").with_message(Cow::Borrowed(
        "Username can only contain letters, numbers, and underscores",
    )))
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if has_lower && has_upper && has_digit {
        return Ok(());
    }

    Err(ValidationError::new("password_strength").with_message(Cow::Borrowed(
        "Password must contain at least one uppercase letter, one lowercase letter, and one number",
    )))
}
