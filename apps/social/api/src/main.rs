use axum::Router;
use axum_helpers::{JwtAuth, create_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::RetryPolicy;
use domain_profiles::{InMemoryProfilesStorage, PgProfilesStorage, ProfilesService};
use domain_users::{AuthService, InMemoryUsersStorage, PgUsersStorage};
use tracing::info;

mod api;
mod config;

use config::{Config, StorageBackend};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let jwt = JwtAuth::new(&config.jwt);
    info!(storage = %config.storage, "Starting social API");

    match config.storage {
        StorageBackend::Memory => serve_in_memory(&config, jwt).await,
        StorageBackend::Postgres => serve_postgres(&config, jwt).await,
    }
}

async fn serve_in_memory(config: &Config, jwt: JwtAuth) -> eyre::Result<()> {
    let api = api::routes(
        AuthService::new(InMemoryUsersStorage::new()),
        ProfilesService::new(InMemoryProfilesStorage::new()),
        jwt,
    );
    let app = app(api, None);

    create_app(app, &config.server, async {
        info!("In-memory storage dropped");
    })
    .await?;

    info!("Social API shutdown complete");
    Ok(())
}

async fn serve_postgres(config: &Config, jwt: JwtAuth) -> eyre::Result<()> {
    let pg = config
        .database
        .as_ref()
        .ok_or_else(|| eyre::eyre!("postgres backend selected without database configuration"))?;

    let db = database::postgres::connect_with_retry(pg, &RetryPolicy::default()).await?;

    if config.run_migrations {
        database::postgres::run_migrations::<migration::Migrator>(&db).await?;
    }

    let api = api::routes(
        AuthService::new(PgUsersStorage::new(db.clone())),
        ProfilesService::new(PgProfilesStorage::new(db.clone())),
        jwt,
    );
    let app = app(api, Some(db.clone()));

    create_app(app, &config.server, async move {
        if let Err(e) = database::postgres::close(db).await {
            tracing::error!("Error closing PostgreSQL pool: {}", e);
        }
    })
    .await?;

    info!("Social API shutdown complete");
    Ok(())
}

fn app(api: Router, db: Option<database::DatabaseConnection>) -> Router {
    create_router(api).merge(api::health::ready_router(db))
}
