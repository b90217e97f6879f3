//! Access token issuing and verification.
//!
//! Tokens are HS256 JWTs signed with [`JwtConfig::secret`]. The configuration
//! is always passed in explicitly; nothing here reads the environment.
//!
//! # Example
//!
//! ```ignore
//! use coursehub_auth::{UserRole, create_access_token, verify_token};
//!
//! let issued = create_access_token(user_id, UserRole::Admin, &jwt_config)?;
//! let claims = verify_token(&issued.token, &jwt_config)?;
//! ```

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use coursehub_config::JwtConfig;
use coursehub_core::AppError;

use crate::claims::Claims;
use crate::error::AuthError;
use crate::role::UserRole;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// A freshly signed token and when it stops being accepted.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    /// Lifetime in seconds.
    pub expires_in: i64,
}

/// Issues an access token valid for `access_token_expiry` seconds from now.
pub fn create_access_token(
    user_id: Uuid,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<IssuedToken, AppError> {
    create_access_token_at(user_id, role, Utc::now(), jwt_config)
}

/// Issues an access token as if it had been signed at `issued_at`.
pub fn create_access_token_at(
    user_id: Uuid,
    role: UserRole,
    issued_at: DateTime<Utc>,
    jwt_config: &JwtConfig,
) -> Result<IssuedToken, AppError> {
    let expires_at = issued_at + Duration::seconds(jwt_config.access_token_expiry);

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        iat: issued_at.timestamp(),
        exp: expires_at.timestamp(),
    };

    let token = encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))?;

    Ok(IssuedToken {
        token,
        expires_at,
        expires_in: jwt_config.access_token_expiry,
    })
}

/// Checks signature and expiry, returning the embedded claims.
///
/// Expiry is enforced with zero leeway. Expired tokens are reported as
/// [`AuthError::ExpiredCredential`]; every other decode failure is
/// [`AuthError::InvalidCredential`].
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::ExpiredCredential,
        _ => AuthError::invalid_token(),
    })
}

fn validation() -> Validation {
    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}
