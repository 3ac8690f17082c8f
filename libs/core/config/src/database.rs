use crate::{ConfigError, FromEnv, env_or_default, env_required};

/// Connection parameters for the relational store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DatabaseConfig {
    pub fn new(host: &str, port: u16, user: &str, password: &str, database: &str) -> Self {
        Self {
            host: host.to_string(),
            port,
            user: user.to_string(),
            password: password.to_string(),
            database: database.to_string(),
        }
    }

    /// Render as a `postgres://` connection URL
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

impl FromEnv for DatabaseConfig {
    /// Reads DB_HOST, DB_USER, DB_PASSWORD and DB_NAME (required) and
    /// DB_PORT (defaults to 5432)
    fn from_env() -> Result<Self, ConfigError> {
        let port = env_or_default("DB_PORT", "5432")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "DB_PORT".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self {
            host: env_required("DB_HOST")?,
            port,
            user: env_required("DB_USER")?,
            password: env_required("DB_PASSWORD")?,
            database: env_required("DB_NAME")?,
        })
    }
}
