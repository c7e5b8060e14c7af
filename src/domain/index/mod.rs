//! Embedding index domain - stored vectors for semantic search

mod record;
mod repository;

pub use record::{EmbeddingMetadata, EmbeddingRecord};
pub use repository::EmbeddingRepository;

#[cfg(test)]
pub use repository::MockEmbeddingRepository;
