//! Cache domain - advisory response cache abstraction

mod key;
mod repository;

pub use key::{CacheKeyParams, UPSTREAM_NAMESPACE};
pub use repository::{CacheStore, CacheStoreExt};

#[cfg(test)]
pub use repository::mock::MockCacheStore;
