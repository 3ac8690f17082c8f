//! PostgreSQL connection management for the social services
//!
//! Builds the SeaORM connection pool from environment configuration, retries
//! the initial connect with exponential backoff, applies migrations and
//! exposes a readiness check.
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use database::common::RetryPolicy;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_with_retry(&config, &RetryPolicy::default()).await?;
//! postgres::run_migrations::<migration::Migrator>(&db).await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryPolicy};
pub use postgres::{DatabaseConnection, PostgresConfig};
