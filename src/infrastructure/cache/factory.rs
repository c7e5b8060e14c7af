//! Cache factory for runtime selection

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePool;

use crate::domain::DomainError;
use crate::domain::cache::CacheStore;

use super::in_memory::InMemoryCacheStore;
use super::sqlite::SqliteCacheStore;

/// Supported cache backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheBackend {
    /// Rows in the local SQLite database, survives restarts
    #[default]
    Sqlite,
    /// Process-local moka cache
    InMemory,
}

impl std::fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheBackend::Sqlite => write!(f, "sqlite"),
            CacheBackend::InMemory => write!(f, "in_memory"),
        }
    }
}

impl std::str::FromStr for CacheBackend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(CacheBackend::Sqlite),
            "in_memory" | "inmemory" | "memory" => Ok(CacheBackend::InMemory),
            _ => Err(DomainError::configuration(format!(
                "Unknown cache backend: {}. Valid backends: sqlite, in_memory",
                s
            ))),
        }
    }
}

/// Factory for creating cache store instances
#[derive(Debug, Default)]
pub struct CacheStoreFactory;

impl CacheStoreFactory {
    pub fn new() -> Self {
        Self
    }

    /// Creates a cache store for the backend; `pool` backs the SQLite store
    pub fn create(&self, backend: CacheBackend, pool: &SqlitePool) -> Arc<dyn CacheStore> {
        tracing::debug!(backend = %backend, "Creating cache store");

        match backend {
            CacheBackend::Sqlite => Arc::new(SqliteCacheStore::new(pool.clone())),
            CacheBackend::InMemory => Arc::new(InMemoryCacheStore::new()),
        }
    }
}
