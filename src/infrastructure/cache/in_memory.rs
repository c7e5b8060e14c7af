//! In-memory cache implementation using moka

use async_trait::async_trait;
use chrono::Utc;
use moka::future::Cache as MokaCache;
use moka::ops::compute::{CompResult, Op};

use crate::domain::DomainError;
use crate::domain::cache::CacheStore;

/// Configuration for in-memory cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
        }
    }
}

impl InMemoryCacheConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: String,
    /// Expiration timestamp (millis since epoch), `None` never expires
    expires_at: Option<i64>,
}

impl CacheEntry {
    fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Process-local cache store, lost on restart
///
/// Expiry follows the same rules as the SQLite store: expired entries are
/// invisible to `get` and removed by `clear_expired`. Capacity eviction is
/// left to moka.
///
/// Writes and sweeps both go through moka's per-key compute lock, so a sweep
/// never removes an entry that was rewritten after it was found expired.
#[derive(Debug)]
pub struct InMemoryCacheStore {
    cache: MokaCache<String, CacheEntry>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        Self {
            cache: MokaCache::builder().max_capacity(config.max_capacity).build(),
        }
    }

    fn now_millis() -> i64 {
        Utc::now().timestamp_millis()
    }
}

impl Default for InMemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> Option<String> {
        let entry = self.cache.get(key).await?;

        if entry.is_expired(Self::now_millis()) {
            return None;
        }

        Some(entry.data)
    }

    async fn set(&self, key: &str, payload: &str, ttl_minutes: i64) -> Result<(), DomainError> {
        let entry = CacheEntry {
            data: payload.to_string(),
            expires_at: Some(Self::now_millis().saturating_add(ttl_minutes.saturating_mul(60_000))),
        };

        self.cache
            .entry(key.to_string())
            .and_compute_with(|_| async move { Op::Put(entry) })
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn clear_expired(&self) -> Result<u64, DomainError> {
        self.cache.run_pending_tasks().await;

        let now = Self::now_millis();
        let candidates: Vec<String> = self
            .cache
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.as_ref().clone())
            .collect();

        let mut removed = 0u64;
        for key in candidates {
            let outcome = self
                .cache
                .entry(key)
                .and_compute_with(|existing| async move {
                    match existing {
                        Some(entry) if entry.value().is_expired(now) => Op::Remove,
                        _ => Op::Nop,
                    }
                })
                .await;

            if matches!(outcome, CompResult::Removed(_)) {
                removed += 1;
            }
        }

        Ok(removed)
    }

    async fn clear_all(&self) -> Result<(), DomainError> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }
}
