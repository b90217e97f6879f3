//! # CourseHub Config
//!
//! Configuration types for the CourseHub API.
//!
//! Every struct is loaded once from environment variables at startup and then
//! passed explicitly to whatever needs it:
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: allowed browser origins
//! - [`server`]: bind address and metrics port
//! - [`database`]: connection URL and pool size
//!
//! # Example
//!
//! ```ignore
//! use coursehub_config::{CorsConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env()?;
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

use thiserror::Error;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Startup-time configuration failure. Always fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} has an invalid value: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Reads a variable through `lookup` and parses it, falling back to `default`
/// when unset. A set-but-unparseable value is an error, not a silent default.
pub(crate) fn parse_or<T, F>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|_| ConfigError::Invalid { var, value })
        }
        None => Ok(default),
    }
}
