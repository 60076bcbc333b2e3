//! Rate-limit record persistence over a key-value store

use platform::rate_limit::RateLimitRecord;
use platform::storage::{KeyValueStore, StorageError};

use crate::domain::repository::RateLimitRepository;

/// Stores the record as JSON under a single key
#[derive(Debug)]
pub struct StoredRateLimitRepository<K: KeyValueStore> {
    store: K,
    key: String,
}

impl<K: KeyValueStore> StoredRateLimitRepository<K> {
    pub fn new(store: K, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<K: KeyValueStore> RateLimitRepository for StoredRateLimitRepository<K> {
    fn load(&self) -> Result<Option<RateLimitRecord>, StorageError> {
        match self.store.get(&self.key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, record: &RateLimitRecord) -> Result<(), StorageError> {
        let raw = serde_json::to_string(record)?;
        self.store.set(&self.key, &raw)
    }
}
