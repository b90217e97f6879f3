use std::env;

use crate::{ConfigError, parse_or};

/// Token signing configuration.
///
/// The secret is loaded once and never rotated while the process runs.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub const DEFAULT_ACCESS_EXPIRY: i64 = 3600; // 1 hour

    /// Loads `JWT_SECRET` (required) and `JWT_ACCESS_EXPIRY` (optional).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let access_token_expiry =
            parse_or(&lookup, "JWT_ACCESS_EXPIRY", Self::DEFAULT_ACCESS_EXPIRY)?;
        if access_token_expiry <= 0 {
            return Err(ConfigError::Invalid {
                var: "JWT_ACCESS_EXPIRY",
                value: access_token_expiry.to_string(),
            });
        }

        Ok(Self {
            secret,
            access_token_expiry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_expiry() {
        let config = JwtConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.secret, "s3cret");
        assert_eq!(config.access_token_expiry, 3600);
    }

    #[test]
    fn test_custom_expiry() {
        let config = JwtConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_ACCESS_EXPIRY", "86400"),
        ]))
        .unwrap();
        assert_eq!(config.access_token_expiry, 86400);
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let err = JwtConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_blank_secret_is_fatal() {
        let err = JwtConfig::from_lookup(lookup(&[("JWT_SECRET", "   ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_invalid_expiry() {
        let err = JwtConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_ACCESS_EXPIRY", "one hour"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "JWT_ACCESS_EXPIRY", .. }));

        let err = JwtConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_ACCESS_EXPIRY", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "JWT_ACCESS_EXPIRY", .. }));
    }
}
