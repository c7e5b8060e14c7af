//! SQLite-backed embedding repository

use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqliteRow};

use crate::domain::DomainError;
use crate::domain::index::{EmbeddingMetadata, EmbeddingRecord, EmbeddingRepository};

/// Embeddings stored in `character_embeddings`, vectors and metadata as JSON text
#[derive(Debug, Clone)]
pub struct SqliteEmbeddingRepository {
    pool: SqlitePool,
}

impl SqliteEmbeddingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn decode_vector(raw: &str) -> Result<Vec<f32>, DomainError> {
        serde_json::from_str(raw)
            .map_err(|e| DomainError::storage(format!("Failed to deserialize embedding: {}", e)))
    }

    fn row_to_record(row: &SqliteRow) -> Result<EmbeddingRecord, DomainError> {
        let embedding: String = row.get("embedding");
        let metadata: Option<String> = row.get("metadata");

        let metadata = match metadata.as_deref() {
            Some(raw) if !raw.is_empty() => serde_json::from_str::<EmbeddingMetadata>(raw)
                .map_err(|e| DomainError::storage(format!("Failed to deserialize metadata: {}", e)))?,
            _ => EmbeddingMetadata::new(),
        };

        Ok(EmbeddingRecord {
            entity_id: row.get("character_id"),
            entity_name: row.get("character_name"),
            vector: Self::decode_vector(&embedding)?,
            metadata,
        })
    }
}

#[async_trait]
impl EmbeddingRepository for SqliteEmbeddingRepository {
    async fn save(&self, record: &EmbeddingRecord) -> Result<(), DomainError> {
        let embedding = serde_json::to_string(&record.vector)
            .map_err(|e| DomainError::storage(format!("Failed to serialize embedding: {}", e)))?;

        let metadata = if record.metadata.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&record.metadata).map_err(|e| {
                DomainError::storage(format!("Failed to serialize metadata: {}", e))
            })?)
        };

        sqlx::query(
            r#"
            INSERT INTO character_embeddings (character_id, character_name, embedding, metadata)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(character_id) DO UPDATE SET
                character_name = excluded.character_name,
                embedding = excluded.embedding,
                metadata = excluded.metadata,
                created_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(record.entity_id)
        .bind(&record.entity_name)
        .bind(embedding)
        .bind(metadata)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to save embedding: {}", e)))?;

        Ok(())
    }

    async fn get(&self, entity_id: i64) -> Result<Option<Vec<f32>>, DomainError> {
        let raw: Option<String> =
            sqlx::query_scalar("SELECT embedding FROM character_embeddings WHERE character_id = ?")
                .bind(entity_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to get embedding: {}", e)))?;

        raw.as_deref().map(Self::decode_vector).transpose()
    }

    async fn get_all(&self) -> Result<Vec<EmbeddingRecord>, DomainError> {
        let rows = sqlx::query(
            "SELECT character_id, character_name, embedding, metadata \
             FROM character_embeddings ORDER BY character_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list embeddings: {}", e)))?;

        rows.iter().map(Self::row_to_record).collect()
    }

    async fn exists(&self, entity_id: i64) -> Result<bool, DomainError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM character_embeddings WHERE character_id = ?")
                .bind(entity_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to check embedding: {}", e)))?;

        Ok(count > 0)
    }

    async fn delete(&self, entity_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM character_embeddings WHERE character_id = ?")
            .bind(entity_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete embedding: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM character_embeddings")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count embeddings: {}", e)))?;

        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::testing::migrated_pool;

    async fn repository() -> SqliteEmbeddingRepository {
        SqliteEmbeddingRepository::new(migrated_pool().await)
    }

    fn record(id: i64, vector: Vec<f32>) -> EmbeddingRecord {
        EmbeddingRecord::new(id, format!("Character {}", id), vector)
            .with_metadata("species", "Human")
            .with_metadata("status", "Alive")
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let repo = repository().await;

        repo.save(&record(1, vec![0.25, -0.5, 1.0])).await.unwrap();

        assert_eq!(repo.get(1).await.unwrap(), Some(vec![0.25, -0.5, 1.0]));
        assert!(repo.exists(1).await.unwrap());
        assert!(repo.get(2).await.unwrap().is_none());
        assert!(!repo.exists(2).await.unwrap());
    }

    #[tokio::test]
    async fn test_save_replaces_existing_record() {
        let repo = repository().await;

        repo.save(&record(1, vec![1.0, 0.0])).await.unwrap();
        repo.save(&EmbeddingRecord::new(1, "Rick Prime", vec![0.0, 1.0])).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        let all = repo.get_all().await.unwrap();
        assert_eq!(all[0].entity_name, "Rick Prime");
        assert_eq!(all[0].vector, vec![0.0, 1.0]);
        assert!(all[0].metadata.is_empty());
    }

    #[tokio::test]
    async fn test_get_all_round_trips_metadata() {
        let repo = repository().await;
        repo.save(&record(2, vec![0.5])).await.unwrap();
        repo.save(&record(1, vec![0.1])).await.unwrap();

        let all = repo.get_all().await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].entity_id, 1);
        assert_eq!(all[1].metadata["species"], "Human");
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repository().await;
        repo.save(&record(1, vec![1.0])).await.unwrap();

        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
        assert!(repo.get(1).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_vector_is_storage_error() {
        let pool = migrated_pool().await;
        sqlx::query(
            "INSERT INTO character_embeddings (character_id, character_name, embedding) VALUES (9, 'Bad', 'not json')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let repo = SqliteEmbeddingRepository::new(pool);

        assert!(matches!(repo.get(9).await, Err(DomainError::Storage { .. })));
        assert!(matches!(repo.get_all().await, Err(DomainError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_closed_pool_is_storage_error() {
        let pool = migrated_pool().await;
        let repo = SqliteEmbeddingRepository::new(pool.clone());
        pool.close().await;

        assert!(matches!(repo.count().await, Err(DomainError::Storage { .. })));
    }
}
