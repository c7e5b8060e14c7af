//! Cache command - maintenance of cached upstream responses
//!
//! Always works on the SQLite cache table. The in-memory backend lives only
//! inside a running server, so there is nothing for a separate process to
//! sweep.

use std::sync::Arc;

use clap::{Args, Subcommand};
use tracing::{info, warn};

use crate::AppConfig;
use crate::domain::cache::CacheStore;
use crate::infrastructure::cache::{CacheBackend, SqliteCacheStore};

#[derive(Debug, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum CacheAction {
    /// Delete entries whose TTL has passed
    Sweep,
    /// Delete every entry
    Clear,
}

pub async fn run(args: CacheArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();
    let cache = open_persistent_cache(&config).await?;

    let message = execute(args.action, cache.as_ref()).await?;
    println!("{}", message);

    Ok(())
}

async fn open_persistent_cache(config: &AppConfig) -> anyhow::Result<Arc<dyn CacheStore>> {
    if config.cache.backend == CacheBackend::InMemory {
        warn!(
            path = %config.database.path,
            "Configured cache backend is in_memory; maintaining the SQLite cache instead"
        );
    }

    let pool = crate::open_database(config).await?;
    Ok(Arc::new(SqliteCacheStore::new(pool)))
}

async fn execute(action: CacheAction, cache: &dyn CacheStore) -> anyhow::Result<String> {
    match action {
        CacheAction::Sweep => {
            let removed = cache.clear_expired().await?;
            info!(removed, "Expired cache entries removed");
            Ok(format!("Removed {} expired entries", removed))
        }
        CacheAction::Clear => {
            cache.clear_all().await?;
            info!("Cache cleared");
            Ok("Cache cleared".to_string())
        }
    }
}
