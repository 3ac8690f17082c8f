//! JWT configuration loaded through `core_config::FromEnv`.

use core_config::{ConfigError, FromEnv, env_or_default, env_required};

/// Default lifetime of an access token
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 72;

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - Must be at least 32 characters
/// - `JWT_TTL_HOURS` (optional) - Access token lifetime, default 72
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// HS256 signing secret (minimum 32 characters)
    pub secret: String,
    /// Access token lifetime in hours
    pub ttl_hours: i64,
}

impl JwtConfig {
    /// Create a config with the default token lifetime.
    ///
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
        }
    }

    pub fn with_ttl_hours(mut self, ttl_hours: i64) -> Self {
        self.ttl_hours = ttl_hours;
        self
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let ttl_hours = env_or_default("JWT_TTL_HOURS", &DEFAULT_TOKEN_TTL_HOURS.to_string())
            .parse::<i64>()
            .ok()
            .filter(|hours| *hours > 0)
            .ok_or_else(|| ConfigError::ParseError {
                key: "JWT_TTL_HOURS".to_string(),
                details: "must be a positive number of hours".to_string(),
            })?;

        Ok(Self { secret, ttl_hours })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    #[test]
    fn test_jwt_config_new_uses_default_ttl() {
        let config = JwtConfig::new(SECRET);
        assert_eq!(config.secret, SECRET);
        assert_eq!(config.ttl_hours, 72);
    }

    #[test]
    #[should_panic(expected = "JWT secret must be at least 32 characters")]
    fn test_jwt_config_new_too_short() {
        JwtConfig::new("short");
    }

    #[test]
    fn test_jwt_config_from_env_valid() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("JWT_TTL_HOURS", Some("12"))],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.secret, SECRET);
                assert_eq!(config.ttl_hours, 12);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_missing() {
        temp_env::with_var_unset("JWT_SECRET", || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_SECRET"));
        });
    }

    #[test]
    fn test_jwt_config_from_env_too_short() {
        temp_env::with_var("JWT_SECRET", Some("short"), || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("32 characters"));
        });
    }

    #[test]
    fn test_jwt_config_from_env_rejects_bad_ttl() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("JWT_TTL_HOURS", Some("-1"))],
            || {
                let err = JwtConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("JWT_TTL_HOURS"));
            },
        );
    }
}
