//! Shared test utilities for the domain crates
//!
//! - `TestDatabase`: migrated PostgreSQL container, removed on drop
//! - `TestDataBuilder`: deterministic per-test emails and logins
//! - `assertions`: id assertion helper
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestDatabase};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_postgres_test");
//!
//!     let email = builder.email("main");
//!     let login = builder.login("main");
//! }
//! ```

mod postgres;

pub use postgres::TestDatabase;

/// Deterministic test data keyed on a seed.
///
/// Distinct seeds yield distinct emails and logins, so tests sharing a database
/// do not trip the uniqueness constraints.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test's name
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_register");
    /// assert_eq!(builder.login("a"), TestDataBuilder::from_test_name("test_register").login("a"));
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn email(&self, suffix: &str) -> String {
        format!("test-{}-{}@example.com", self.seed, suffix)
    }

    pub fn login(&self, suffix: &str) -> String {
        format!("test_{}_{}", self.seed, suffix)
    }
}

pub mod assertions {
    /// Assert an identifier is a positive decimal integer and return it
    pub fn assert_numeric_id(id: &str, context: &str) -> i64 {
        match id.parse::<i64>() {
            Ok(n) if n > 0 => n,
            _ => panic!("{}: expected a positive numeric id, got {:?}", context, id),
        }
    }
}
