use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};
use crate::password::{spawn_hash_password, spawn_verify_password};
use crate::repository::UsersStorage;

/// Registration and credential verification on top of a UsersStorage
#[derive(Clone)]
pub struct AuthService<S: UsersStorage> {
    storage: Arc<S>,
}

impl<S: UsersStorage> AuthService<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    /// Register a new user and return the storage-assigned id.
    ///
    /// The existence check is a fast path only; `UsersStorage::add` is what
    /// guarantees uniqueness when two registrations race.
    pub async fn new_user(&self, input: NewUser) -> UserResult<String> {
        let password_hash = spawn_hash_password(input.password)
            .await
            .map_err(|e| e.context("hashing password"))?;
        let user = User::new(input.email, input.login, password_hash);

        let exists = self
            .storage
            .exists(&user)
            .await
            .map_err(|e| e.context("checking if user exists"))?;
        if exists {
            return Err(UserError::AlreadyExists {
                email: user.email,
                login: user.login,
            });
        }

        let id = self
            .storage
            .add(user)
            .await
            .map_err(|e| e.context("creating new user"))?;

        tracing::info!(user_id = %id, "Registered user");
        Ok(id)
    }

    /// Verify credentials and return the user's id.
    ///
    /// An unknown login surfaces as `UserError::NotFound`, a wrong password as
    /// `UserError::BadCredentials`.
    pub async fn login(&self, login: &str, password: &str) -> UserResult<String> {
        let user = self
            .storage
            .get(login)
            .await
            .map_err(|e| e.context("looking for user"))?;

        let matches = spawn_verify_password(password.to_string(), user.password_hash)
            .await
            .map_err(|e| e.context("verifying password"))?;
        if !matches {
            tracing::info!(user_id = %user.id, "Rejected login with wrong password");
            return Err(UserError::BadCredentials);
        }

        Ok(user.id)
    }
}
