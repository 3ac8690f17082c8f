//! Users Domain
//!
//! Registration and login for the social API.
//!
//! # Features
//!
//! - Registration with Argon2id password hashing
//! - Uniqueness of email and login, enforced by the storage backend
//! - Login returning the user id, exchanged for a JWT by the HTTP layer
//! - In-memory and PostgreSQL storage behind one trait
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /register, /login
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ AuthService │  ← hashing, existence check, credential verification
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │UsersStorage │  ← trait + in-memory / Postgres providers
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, request/response DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{AuthService, InMemoryUsersStorage, handlers};
//!
//! let service = AuthService::new(InMemoryUsersStorage::new());
//! let jwt = JwtAuth::new(&JwtConfig::new("a-secret-that-is-at-least-32-chars!!"));
//!
//! let router = handlers::router(service, jwt);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use models::{LoginRequest, LoginResponse, NewUser, RegisterResponse, User};
pub use postgres::PgUsersStorage;
pub use repository::{InMemoryUsersStorage, UsersStorage};
pub use service::AuthService;
