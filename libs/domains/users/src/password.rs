//! Password hashing with Argon2id.
//!
//! Hashes are self-describing PHC strings (`$argon2id$v=19$m=...`), so the
//! parameters used at registration travel with the stored hash.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::error::{UserError, UserResult};

/// Memory cost in KiB
pub const ARGON2_MEMORY_KIB: u32 = 19 * 1024;
/// Number of passes over memory
pub const ARGON2_ITERATIONS: u32 = 2;
/// Degree of parallelism
pub const ARGON2_PARALLELISM: u32 = 1;

fn hasher() -> UserResult<Argon2<'static>> {
    let params = Params::new(
        ARGON2_MEMORY_KIB,
        ARGON2_ITERATIONS,
        ARGON2_PARALLELISM,
        None,
    )
    .map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a plaintext password with a fresh random salt
pub fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

/// Check a plaintext password against a stored hash.
///
/// Returns `Ok(false)` on mismatch; a malformed stored hash is an error.
pub fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    match hasher()?.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(UserError::PasswordHash(e.to_string())),
    }
}

/// `hash_password` on tokio's blocking pool
pub async fn spawn_hash_password(password: String) -> UserResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| UserError::Internal(format!("hashing task failed: {}", e)))?
}

/// `verify_password` on tokio's blocking pool
pub async fn spawn_verify_password(password: String, hash: String) -> UserResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| UserError::Internal(format!("verifying task failed: {}", e)))?
}
