use axum_helpers::JwtConfig;
use core_config::{ConfigError, Environment, FromEnv, env_parse_or, server::ServerConfig};
use database::PostgresConfig;
use strum::{Display, EnumString};

/// Which storage provider backs the services
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromEnv for StorageBackend {
    /// `STORAGE_BACKEND`, defaults to postgres
    fn from_env() -> Result<Self, ConfigError> {
        env_parse_or("STORAGE_BACKEND", StorageBackend::Postgres)
    }
}

/// Everything the binary reads from the environment
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub storage: StorageBackend,
    /// Only loaded for the postgres backend
    pub database: Option<PostgresConfig>,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let storage = StorageBackend::from_env()?;
        let database = match storage {
            StorageBackend::Postgres => Some(PostgresConfig::from_env()?),
            StorageBackend::Memory => None,
        };

        Ok(Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            storage,
            database,
            run_migrations: env_parse_or("RUN_MIGRATIONS", true)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "config-test-secret-of-at-least-32-chars";

    #[test]
    fn test_storage_backend_defaults_to_postgres() {
        temp_env::with_var_unset("STORAGE_BACKEND", || {
            assert_eq!(StorageBackend::from_env().unwrap(), StorageBackend::Postgres);
        });
    }

    #[test]
    fn test_storage_backend_parse_is_case_insensitive() {
        temp_env::with_var("STORAGE_BACKEND", Some("Memory"), || {
            assert_eq!(StorageBackend::from_env().unwrap(), StorageBackend::Memory);
        });
        assert_eq!(StorageBackend::Memory.to_string(), "memory");
    }

    #[test]
    fn test_storage_backend_rejects_unknown() {
        temp_env::with_var("STORAGE_BACKEND", Some("mongo"), || {
            let err = StorageBackend::from_env().unwrap_err();
            assert!(err.to_string().contains("STORAGE_BACKEND"));
        });
    }

    #[test]
    fn test_memory_backend_needs_no_database() {
        temp_env::with_vars(
            [
                ("STORAGE_BACKEND", Some("memory")),
                ("JWT_SECRET", Some(SECRET)),
                ("DATABASE_URL", None),
                ("DB_HOST", None),
                ("RUN_MIGRATIONS", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.storage, StorageBackend::Memory);
                assert!(config.database.is_none());
                assert!(config.run_migrations);
            },
        );
    }

    #[test]
    fn test_postgres_backend_loads_database() {
        temp_env::with_vars(
            [
                ("STORAGE_BACKEND", None),
                ("JWT_SECRET", Some(SECRET)),
                ("DATABASE_URL", Some("postgres://u:p@localhost:5432/social")),
                ("RUN_MIGRATIONS", Some("false")),
            ],
            || {
                let config = Config::from_env().unwrap();
                let database = config.database.unwrap();
                assert_eq!(database.url, "postgres://u:p@localhost:5432/social");
                assert!(!config.run_migrations);
            },
        );
    }

    #[test]
    fn test_missing_jwt_secret_fails() {
        temp_env::with_vars(
            [("STORAGE_BACKEND", Some("memory")), ("JWT_SECRET", None)],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("JWT_SECRET"));
            },
        );
    }
}
