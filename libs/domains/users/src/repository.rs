use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Storage contract for registered users
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersStorage: Send + Sync {
    /// Check whether a user with the same email or login is already stored
    async fn exists(&self, user: &User) -> UserResult<bool>;

    /// Get a user by login, failing with `UserError::NotFound` when absent
    async fn get(&self, login: &str) -> UserResult<User>;

    /// Store a new user and return the assigned identifier.
    ///
    /// Implementations must reject a user whose email or login is taken with
    /// `UserError::AlreadyExists`, atomically with the insert.
    async fn add(&self, user: User) -> UserResult<String>;
}

/// In-memory implementation of UsersStorage (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUsersStorage {
    users: Arc<RwLock<HashMap<String, User>>>,
    last_id: Arc<AtomicU64>,
}

impl InMemoryUsersStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> String {
        (self.last_id.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UsersStorage for InMemoryUsersStorage {
    async fn exists(&self, user: &User) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.conflicts_with(user)))
    }

    async fn get(&self, login: &str) -> UserResult<User> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.login == login)
            .cloned()
            .ok_or_else(|| UserError::NotFound(login.to_string()))
    }

    async fn add(&self, mut user: User) -> UserResult<String> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.conflicts_with(&user)) {
            return Err(UserError::AlreadyExists {
                email: user.email,
                login: user.login,
            });
        }

        let id = self.next_id();
        user.id = id.clone();
        users.insert(id.clone(), user);

        tracing::info!(user_id = %id, "Stored user");
        Ok(id)
    }
}
