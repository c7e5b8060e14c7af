//! Cache store trait definition

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::domain::DomainError;

/// Key/value store with per-entry expiry, fronting upstream reads
///
/// Reads are advisory: `get` never fails. A miss, an expired entry and an
/// internal fault all come back as `None`. Writes and maintenance operations
/// report faults so callers can decide whether to ignore them.
#[async_trait]
pub trait CacheStore: Send + Sync + Debug {
    /// Returns the payload for `key` if present and not expired
    async fn get(&self, key: &str) -> Option<String>;

    /// Stores `payload` under `key`, expiring `ttl_minutes` from now
    ///
    /// Overwrites any existing entry. A non-positive TTL stores an entry that
    /// is already expired.
    async fn set(&self, key: &str, payload: &str, ttl_minutes: i64) -> Result<(), DomainError>;

    /// Deletes an entry, returning true if one existed
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    /// Removes every entry whose expiry has passed, returning the count
    async fn clear_expired(&self) -> Result<u64, DomainError>;

    /// Removes every entry
    async fn clear_all(&self) -> Result<(), DomainError>;
}

/// Extension trait providing typed get/set operations
pub trait CacheStoreExt: CacheStore {
    /// Gets a typed value; undecodable payloads are treated as a miss
    fn get_json<'a, V>(&'a self, key: &'a str) -> impl std::future::Future<Output = Option<V>> + Send
    where
        V: DeserializeOwned + Send,
    {
        async move {
            let data = self.get(key).await?;

            match serde_json::from_str(&data) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(key, error = %e, "Discarding undecodable cache entry");
                    None
                }
            }
        }
    }

    /// Sets a typed value with a TTL in minutes
    fn set_json<'a, V>(
        &'a self,
        key: &'a str,
        value: &'a V,
        ttl_minutes: i64,
    ) -> impl std::future::Future<Output = Result<(), DomainError>> + Send
    where
        V: Serialize + Send + Sync,
    {
        async move {
            let data = serde_json::to_string(value).map_err(|e| {
                DomainError::internal(format!("Failed to serialize cache value: {}", e))
            })?;
            self.set(key, &data, ttl_minutes).await
        }
    }
}

impl<T: CacheStore + ?Sized> CacheStoreExt for T {}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock cache store that ignores expiry and can be told to fail writes
    #[derive(Debug, Default)]
    pub struct MockCacheStore {
        entries: Mutex<HashMap<String, String>>,
        fail_writes: bool,
    }

    impl MockCacheStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_entry(self, key: &str, payload: &str) -> Self {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), payload.to_string());
            self
        }

        pub fn failing_writes(mut self) -> Self {
            self.fail_writes = true;
            self
        }

        pub fn len(&self) -> usize {
            self.entries.lock().unwrap().len()
        }

        pub fn contains(&self, key: &str) -> bool {
            self.entries.lock().unwrap().contains_key(key)
        }
    }

    #[async_trait]
    impl CacheStore for MockCacheStore {
        async fn get(&self, key: &str) -> Option<String> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        async fn set(&self, key: &str, payload: &str, _ttl_minutes: i64) -> Result<(), DomainError> {
            if self.fail_writes {
                return Err(DomainError::storage("mock cache write failure"));
            }

            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), payload.to_string());
            Ok(())
        }

        async fn delete(&self, key: &str) -> Result<bool, DomainError> {
            Ok(self.entries.lock().unwrap().remove(key).is_some())
        }

        async fn clear_expired(&self) -> Result<u64, DomainError> {
            Ok(0)
        }

        async fn clear_all(&self) -> Result<(), DomainError> {
            self.entries.lock().unwrap().clear();
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_typed_round_trip() {
            let cache = MockCacheStore::new();
            cache
                .set_json("k", &vec![1, 2, 3], 60)
                .await
                .unwrap();

            let value: Option<Vec<i32>> = cache.get_json("k").await;
            assert_eq!(value, Some(vec![1, 2, 3]));
        }

        #[tokio::test]
        async fn test_undecodable_entry_is_a_miss() {
            let cache = MockCacheStore::new().with_entry("k", "not json");

            let value: Option<Vec<i32>> = cache.get_json("k").await;
            assert!(value.is_none());
        }

        #[tokio::test]
        async fn test_failing_writes() {
            let cache = MockCacheStore::new().failing_writes();

            assert!(cache.set("k", "v", 60).await.is_err());
            assert!(cache.get("k").await.is_none());
        }
    }
}
