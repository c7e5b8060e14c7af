//! Embedding repository trait

use async_trait::async_trait;

use super::EmbeddingRecord;
use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// Persistent store of entity embeddings, at most one per entity id
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EmbeddingRepository: Send + Sync {
    /// Inserts or replaces the record for its entity id
    async fn save(&self, record: &EmbeddingRecord) -> Result<(), DomainError>;

    /// Returns the stored vector for an entity
    async fn get(&self, entity_id: i64) -> Result<Option<Vec<f32>>, DomainError>;

    /// Returns every stored record
    async fn get_all(&self) -> Result<Vec<EmbeddingRecord>, DomainError>;

    async fn exists(&self, entity_id: i64) -> Result<bool, DomainError>;

    /// Deletes the record for an entity, returning true if one existed
    async fn delete(&self, entity_id: i64) -> Result<bool, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
