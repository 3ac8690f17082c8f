//! Server infrastructure module.
//!
//! - Router assembly with tracing, health endpoint and JSON 404 fallback
//! - Serving with graceful shutdown and post-shutdown cleanup
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router};
//!
//! let router = create_router(api_routes);
//! create_app(router, &config, async {}).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

// Re-export commonly used types and functions
pub use app::{create_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::shutdown_signal;
