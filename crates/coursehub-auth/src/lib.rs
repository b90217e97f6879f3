//! # CourseHub Auth
//!
//! Authentication building blocks for the CourseHub API.
//!
//! - [`role`]: the two disjoint user roles
//! - [`claims`]: the JWT payload
//! - [`jwt`]: token issuing and verification
//! - [`error`]: the rejection taxonomy shared by the auth and role gates
//!
//! The request-level gates themselves live in the application crate
//! (`middleware::auth` and `middleware::role`) because they need the
//! database pool; everything here is pure and synchronous.
//!
//! # Example
//!
//! ```ignore
//! use coursehub_auth::{UserRole, create_access_token, verify_token};
//! use coursehub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let issued = create_access_token(user_id, UserRole::Student, &config)?;
//! let claims = verify_token(&issued.token, &config)?;
//! assert_eq!(claims.role, UserRole::Student);
//! ```

pub mod claims;
pub mod error;
pub mod jwt;
pub mod role;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use error::AuthError;
pub use jwt::{IssuedToken, create_access_token, create_access_token_at, verify_token};
pub use role::{UnknownRole, UserRole};
