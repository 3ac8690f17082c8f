//! Profiles Domain
//!
//! Creation, listing, lookup and prefix search of user profiles.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │     Handlers     │  ← /profiles, /profiles/search, /profiles/{id} (JWT protected)
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │ ProfilesService  │  ← delegation, error kinds passed through
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │ ProfilesStorage  │  ← trait + in-memory / Postgres providers
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │      Models      │  ← Profile, Sex, Hobby, SearchParams, DTOs
//! └──────────────────┘
//! ```
//!
//! The Postgres provider reads every column as nullable and turns NULLs into
//! zero values (empty string, age 0, `Sex::Unknown`) in `TryFrom<ProfileRow>`.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProfileError, ProfileResult};
pub use models::{
    CreatedResponse, Hobby, ParseSexError, Profile, ProfilePayload, ProfileResponse,
    SearchParams, Sex,
};
pub use postgres::PgProfilesStorage;
pub use repository::{InMemoryProfilesStorage, ProfilesStorage};
pub use service::ProfilesService;
