//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthError;
use crate::role::UserRole;

/// Claims embedded in an access token.
///
/// The role recorded here is informational only. Authorization decisions use
/// the role fetched from the database on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Role at the time the token was issued
    pub role: UserRole,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: i64,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AuthError::InvalidCredential("Invalid user ID in token"))
    }
}
