use std::sync::Arc;

use crate::error::ProfileResult;
use crate::models::{Profile, SearchParams};
use crate::repository::ProfilesStorage;

/// Service layer for profiles; delegates to the storage and keeps its error kinds
#[derive(Clone)]
pub struct ProfilesService<S: ProfilesStorage> {
    storage: Arc<S>,
}

impl<S: ProfilesStorage> ProfilesService<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    pub async fn get_all(&self) -> ProfileResult<Vec<Profile>> {
        self.storage.get_all().await
    }

    pub async fn get(&self, id: &str) -> ProfileResult<Profile> {
        self.storage.get(id).await
    }

    /// Prefix search on name and surname; no match is `ProfileError::NotFound`
    pub async fn search(&self, params: &SearchParams) -> ProfileResult<Vec<Profile>> {
        self.storage.search(params).await
    }

    pub async fn add(&self, profile: Profile) -> ProfileResult<String> {
        self.storage.add(profile).await
    }
}
