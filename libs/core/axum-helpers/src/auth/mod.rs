//! Authentication module.
//!
//! - Stateless HS256 JWT issuing and verification (`JwtAuth`)
//! - Bearer-token middleware for protected routes
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/api/profiles", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

// Re-export commonly used types
pub use config::{DEFAULT_TOKEN_TTL_HOURS, JwtConfig};
pub use jwt::{JwtAuth, JwtClaims};
pub use middleware::jwt_auth_middleware;
