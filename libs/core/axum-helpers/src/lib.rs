//! # Axum Helpers
//!
//! Shared HTTP glue for the social API services.
//!
//! ## Modules
//!
//! - **[`auth`]**: Stateless JWT issuing/verification and bearer-token middleware
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Validated JSON extractor
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let router = create_router(Router::new());
//!     create_app(router, &ServerConfig::default(), async {}).await
//! }
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod server;

// Re-export auth types
pub use auth::{DEFAULT_TOKEN_TTL_HOURS, JwtAuth, JwtClaims, JwtConfig, jwt_auth_middleware};

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, create_app, create_router, health_router,
    run_health_checks, shutdown_signal,
};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::ValidatedJson;
