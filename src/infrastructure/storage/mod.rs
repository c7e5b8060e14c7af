//! Storage infrastructure - SQLite pool and schema

pub mod migrations;
mod sqlite;

pub use migrations::{Migration, SqliteMigrator, run_storage_migrations, storage_migrations};
pub use sqlite::{MEMORY_PATH, SqliteConfig, connect};

#[cfg(test)]
pub use sqlite::testing;
