//! Cache infrastructure - Cache store implementations

mod factory;
mod in_memory;
mod sqlite;

pub use factory::{CacheBackend, CacheStoreFactory};
pub use in_memory::{InMemoryCacheConfig, InMemoryCacheStore};
pub use sqlite::SqliteCacheStore;
