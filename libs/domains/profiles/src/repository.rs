use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProfileError, ProfileResult};
use crate::models::{Profile, SearchParams};

/// Storage contract for profiles
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfilesStorage: Send + Sync {
    /// All stored profiles, ordered by id
    async fn get_all(&self) -> ProfileResult<Vec<Profile>>;

    /// Get a profile by id, failing with `ProfileError::NotFound` when absent
    async fn get(&self, id: &str) -> ProfileResult<Profile>;

    /// Profiles whose name and surname start with the given prefixes, ordered by id.
    ///
    /// An empty result is reported as `ProfileError::NotFound`.
    async fn search(&self, params: &SearchParams) -> ProfileResult<Vec<Profile>>;

    /// Store a new profile and return the assigned identifier
    async fn add(&self, profile: Profile) -> ProfileResult<String>;
}

#[derive(Debug, Default)]
struct Inner {
    /// Keyed by the exact id string handed out by `add`
    profiles: HashMap<String, Profile>,
    /// Sequence number to id, for listing in id order
    order: BTreeMap<u64, String>,
    last_id: u64,
}

impl Inner {
    fn ordered(&self) -> impl Iterator<Item = &Profile> {
        self.order.values().filter_map(|id| self.profiles.get(id))
    }
}

/// In-memory implementation of ProfilesStorage (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProfilesStorage {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryProfilesStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.profiles.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.profiles.is_empty()
    }
}

#[async_trait]
impl ProfilesStorage for InMemoryProfilesStorage {
    async fn get_all(&self) -> ProfileResult<Vec<Profile>> {
        let inner = self.inner.read().await;
        Ok(inner.ordered().cloned().collect())
    }

    async fn get(&self, id: &str) -> ProfileResult<Profile> {
        let inner = self.inner.read().await;
        inner
            .profiles
            .get(id)
            .cloned()
            .ok_or_else(|| ProfileError::NotFound(id.to_string()))
    }

    async fn search(&self, params: &SearchParams) -> ProfileResult<Vec<Profile>> {
        let inner = self.inner.read().await;
        let found: Vec<Profile> = inner
            .ordered()
            .filter(|p| params.matches(p))
            .cloned()
            .collect();

        if found.is_empty() {
            return Err(ProfileError::NotFound(format!(
                "name '{}*', surname '{}*'",
                params.name_prefix, params.surname_prefix
            )));
        }

        Ok(found)
    }

    async fn add(&self, mut profile: Profile) -> ProfileResult<String> {
        let mut inner = self.inner.write().await;

        inner.last_id += 1;
        let seq = inner.last_id;
        let id = seq.to_string();
        profile.id = id.clone();
        inner.order.insert(seq, id.clone());
        inner.profiles.insert(id.clone(), profile);

        tracing::info!(profile_id = %id, "Stored profile");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Hobby, Sex};

    fn profile(name: &str, surname: &str) -> Profile {
        Profile {
            user_id: "1".to_string(),
            name: name.to_string(),
            surname: surname.to_string(),
            sex: Sex::Male,
            age: 30,
            address: "Paris".to_string(),
            hobbies: vec![Hobby::new("chess")],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_add_and_get() {
        let storage = InMemoryProfilesStorage::new();

        let id = storage.add(profile("Alfred", "Smith")).await.unwrap();
        assert_eq!(id, "1");

        let fetched = storage.get(&id).await.unwrap();
        assert_eq!(fetched.id, "1");
        assert_eq!(fetched.name, "Alfred");
        assert_eq!(fetched.hobbies, vec![Hobby::new("chess")]);
    }

    #[tokio::test]
    async fn test_get_missing_or_malformed_id_is_not_found() {
        let storage = InMemoryProfilesStorage::new();
        storage.add(profile("Alfred", "Smith")).await.unwrap();

        assert!(storage.get("2").await.unwrap_err().is_not_found());
        assert!(storage.get("abc").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_get_matches_exact_id_only() {
        let storage = InMemoryProfilesStorage::new();
        assert_eq!(storage.add(profile("Alfred", "Smith")).await.unwrap(), "1");

        for alias in ["01", "+1", "001", " 1"] {
            let err = storage.get(alias).await.unwrap_err();
            assert!(err.is_not_found(), "{:?} should not resolve", alias);
        }
        assert_eq!(storage.get("1").await.unwrap().id, "1");
    }

    #[tokio::test]
    async fn test_get_all_is_ordered_by_id() {
        let storage = InMemoryProfilesStorage::new();
        for i in 0..12 {
            storage
                .add(profile(&format!("Name{}", i), "Smith"))
                .await
                .unwrap();
        }

        let ids: Vec<u64> = storage
            .get_all()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id.parse().unwrap())
            .collect();

        assert_eq!(ids, (1..=12).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_search_by_prefix() {
        let storage = InMemoryProfilesStorage::new();
        storage.add(profile("Alfred", "Smith")).await.unwrap();
        storage.add(profile("Bob", "Smith")).await.unwrap();

        let found = storage.search(&SearchParams::new("Al", "")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Alfred");

        let both = storage.search(&SearchParams::new("", "Sm")).await.unwrap();
        assert_eq!(both.len(), 2);
    }

    #[tokio::test]
    async fn test_search_without_matches_is_not_found() {
        let storage = InMemoryProfilesStorage::new();
        storage.add(profile("Alfred", "Smith")).await.unwrap();

        let result = storage.search(&SearchParams::new("Zed", "")).await;
        assert!(matches!(result, Err(ProfileError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_concurrent_adds_assign_unique_ids() {
        let storage = InMemoryProfilesStorage::new();

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let storage = storage.clone();
                tokio::spawn(async move { storage.add(profile("Alfred", "Smith")).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap());
        }
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 32);
        assert_eq!(storage.len().await, 32);
    }
}
