//! SQLite connection pool setup

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::domain::DomainError;

/// Path that selects a private in-memory database
pub const MEMORY_PATH: &str = ":memory:";

/// SQLite storage configuration
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Database file path, or `:memory:`
    pub path: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: "rick_and_morty.db".to_string(),
            max_connections: 5,
            connect_timeout_secs: 30,
        }
    }
}

impl SqliteConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MEMORY_PATH)
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn is_memory(&self) -> bool {
        self.path == MEMORY_PATH
    }
}

/// Opens a pool, creating the database file if it does not exist
///
/// An in-memory database lives only as long as its connection, so the pool
/// is pinned to one connection that is never recycled.
pub async fn connect(config: &SqliteConfig) -> Result<SqlitePool, DomainError> {
    let options = if config.is_memory() {
        SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DomainError::configuration(format!("Invalid SQLite options: {}", e)))?
    } else {
        SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
    };

    let mut pool_options = SqlitePoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs));

    pool_options = if config.is_memory() {
        pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.max_connections(config.max_connections)
    };

    pool_options
        .connect_with(options)
        .await
        .map_err(|e| {
            DomainError::storage(format!("Failed to open SQLite database '{}': {}", config.path, e))
        })
}
