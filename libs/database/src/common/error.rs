use core_config::ConfigError;

/// Errors raised while setting up or probing the database
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    /// Connection could not be established within the retry budget
    #[error("Connection failed after {attempts} attempts: {source}")]
    ConnectionFailed {
        attempts: u32,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Migration error: {0}")]
    Migration(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
