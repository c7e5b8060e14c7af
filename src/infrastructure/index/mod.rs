//! Embedding index infrastructure

mod sqlite;

pub use sqlite::SqliteEmbeddingRepository;
