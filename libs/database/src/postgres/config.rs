use core_config::database::DatabaseConfig;
use core_config::{ConfigError, FromEnv, env_parse_or};
use sea_orm::ConnectOptions;
use std::time::Duration;
use tracing::log::LevelFilter;

/// Connection URL plus pool tuning for the SeaORM pool
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    /// Log every statement sqlx executes
    pub sql_logging: bool,
}

impl PostgresConfig {
    /// Default pool settings for the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn from_parts(database: &DatabaseConfig) -> Self {
        Self::new(database.url())
    }

    pub fn with_pool_size(mut self, max_connections: u32, min_connections: u32) -> Self {
        self.max_connections = max_connections;
        self.min_connections = min_connections;
        self
    }

    pub fn connect_options(&self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url.clone());
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(self.connect_timeout)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .sqlx_logging(self.sql_logging)
            .sqlx_logging_level(LevelFilter::Debug);
        opt
    }

    /// The URL with the password replaced, for logging
    pub fn redacted_url(&self) -> String {
        match (self.url.find("://"), self.url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                let credentials = &self.url[scheme_end + 3..at];
                let user = credentials.split(':').next().unwrap_or_default();
                format!("{}{}:***{}", &self.url[..scheme_end + 3], user, &self.url[at..])
            }
            _ => self.url.clone(),
        }
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 100,
            min_connections: 5,
            connect_timeout: Duration::from_secs(8),
            acquire_timeout: Duration::from_secs(8),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(1800),
            sql_logging: false,
        }
    }
}

impl FromEnv for PostgresConfig {
    /// `DATABASE_URL` wins when set, otherwise the URL is assembled from
    /// `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`.
    ///
    /// Pool: `DB_MAX_CONNECTIONS` (100), `DB_MIN_CONNECTIONS` (5),
    /// `DB_CONNECT_TIMEOUT` (8s), `DB_ACQUIRE_TIMEOUT` (8s),
    /// `DB_IDLE_TIMEOUT` (300s), `DB_MAX_LIFETIME` (1800s), `DB_SQL_LOGGING` (false).
    fn from_env() -> Result<Self, ConfigError> {
        let url = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => DatabaseConfig::from_env()?.url(),
        };

        let defaults = Self::default();
        let secs = |key: &str, default: Duration| -> Result<Duration, ConfigError> {
            env_parse_or(key, default.as_secs()).map(Duration::from_secs)
        };

        Ok(Self {
            url,
            max_connections: env_parse_or("DB_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: env_parse_or("DB_MIN_CONNECTIONS", defaults.min_connections)?,
            connect_timeout: secs("DB_CONNECT_TIMEOUT", defaults.connect_timeout)?,
            acquire_timeout: secs("DB_ACQUIRE_TIMEOUT", defaults.acquire_timeout)?,
            idle_timeout: secs("DB_IDLE_TIMEOUT", defaults.idle_timeout)?,
            max_lifetime: secs("DB_MAX_LIFETIME", defaults.max_lifetime)?,
            sql_logging: env_parse_or("DB_SQL_LOGGING", defaults.sql_logging)?,
        })
    }
}
