use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryPolicy, retry_with_backoff};

/// Open a connection pool with a single attempt
pub async fn connect(config: &PostgresConfig) -> DatabaseResult<DatabaseConnection> {
    let db = Database::connect(config.connect_options()).await?;
    info!(url = %config.redacted_url(), "Connected to PostgreSQL");
    Ok(db)
}

/// Open a connection pool, retrying with backoff while the server is unreachable.
///
/// Used at startup, where the database container may still be booting.
pub async fn connect_with_retry(
    config: &PostgresConfig,
    policy: &RetryPolicy,
) -> DatabaseResult<DatabaseConnection> {
    let options = config.connect_options();

    let db = retry_with_backoff(policy, "postgres connect", || {
        Database::connect(options.clone())
    })
    .await
    .map_err(|source| DatabaseError::ConnectionFailed {
        attempts: policy.attempts(),
        source,
    })?;

    info!(url = %config.redacted_url(), "Connected to PostgreSQL");
    Ok(db)
}

/// Apply every pending migration of `M`
pub async fn run_migrations<M: MigratorTrait>(db: &DatabaseConnection) -> DatabaseResult<()> {
    info!("Applying database migrations");
    M::up(db, None)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;
    info!("Database migrations applied");
    Ok(())
}

/// Close the pool, waiting for checked-out connections to be returned
pub async fn close(db: DatabaseConnection) -> DatabaseResult<()> {
    db.close().await?;
    info!("PostgreSQL pool closed");
    Ok(())
}
