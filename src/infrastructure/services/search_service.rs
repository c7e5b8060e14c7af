//! Semantic search over indexed character embeddings

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::DomainError;
use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest, cosine_similarity};
use crate::domain::index::{EmbeddingRecord, EmbeddingRepository};
use crate::domain::multiverse::{Character, MultiverseGateway};
use crate::domain::search::{IndexReport, SearchResult};

/// Ids indexed when a batch run is not given any
pub const DEFAULT_INDEX_IDS: std::ops::RangeInclusive<i64> = 1..=50;

pub const DEFAULT_TOP_K: usize = 5;

/// Indexes characters as embeddings and ranks them against free-text queries
///
/// Search is a brute-force scan of every stored vector.
pub struct SearchService {
    gateway: Arc<dyn MultiverseGateway>,
    embeddings: Arc<dyn EmbeddingRepository>,
    provider: Arc<dyn EmbeddingProvider>,
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("provider", &self.provider.provider_name())
            .field("model", &self.provider.model())
            .finish()
    }
}

impl SearchService {
    pub fn new(
        gateway: Arc<dyn MultiverseGateway>,
        embeddings: Arc<dyn EmbeddingRepository>,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            gateway,
            embeddings,
            provider,
        }
    }

    fn record_for(character: &Character, vector: Vec<f32>) -> EmbeddingRecord {
        EmbeddingRecord::new(character.id, character.name.clone(), vector)
            .with_metadata("species", character.species.clone())
            .with_metadata("status", character.status.clone())
            .with_metadata("gender", character.gender.clone())
    }

    async fn try_index_character(&self, character_id: i64) -> Result<(), DomainError> {
        let character = self.gateway.get_character(character_id).await?;

        let embedding = self
            .provider
            .embed(EmbeddingRequest::document(
                self.provider.model(),
                character.description(),
            ))
            .await?;

        self.embeddings
            .save(&Self::record_for(&character, embedding.into_vector()))
            .await
    }

    /// Fetches, embeds and stores one character; failures are logged and
    /// reported as `false`
    pub async fn index_character(&self, character_id: i64) -> bool {
        match self.try_index_character(character_id).await {
            Ok(()) => true,
            Err(e) => {
                warn!(character_id, error = %e, "Failed to index character");
                false
            }
        }
    }

    /// Indexes each id in turn, one request at a time
    pub async fn index_characters(&self, character_ids: Option<Vec<i64>>) -> IndexReport {
        let ids = character_ids.unwrap_or_else(|| DEFAULT_INDEX_IDS.collect());
        let mut report = IndexReport::default();

        for character_id in ids {
            match self.try_index_character(character_id).await {
                Ok(()) => report.record_success(),
                Err(e) => {
                    warn!(character_id, error = %e, "Failed to index character");
                    report.record_failure(character_id, e.to_string());
                }
            }
        }

        info!(
            indexed = report.indexed_count,
            failed = report.errors.len(),
            "Character indexing finished"
        );

        report
    }

    /// Ranks indexed characters by cosine similarity to `query`
    ///
    /// Fails with `EmptyIndex` when nothing is indexed. Records whose
    /// character can no longer be fetched are left out of the results.
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>, DomainError> {
        let records = self.embeddings.get_all().await?;

        if records.is_empty() {
            return Err(DomainError::EmptyIndex);
        }

        let query_vector = self
            .provider
            .embed(EmbeddingRequest::query(self.provider.model(), query))
            .await?
            .into_vector();

        let ids: Vec<i64> = records.iter().map(|r| r.entity_id).collect();
        let mut characters: HashMap<i64, Character> = self
            .gateway
            .get_characters_batch(&ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let mut results: Vec<SearchResult> = records
            .into_iter()
            .filter_map(|record| {
                let similarity = cosine_similarity(&query_vector, &record.vector);

                match characters.remove(&record.entity_id) {
                    Some(character) => Some(SearchResult {
                        character,
                        similarity,
                        metadata: record.metadata,
                    }),
                    None => {
                        debug!(character_id = record.entity_id, "Dropping unhydrated search hit");
                        None
                    }
                }
            })
            .collect();

        results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        results.truncate(top_k);

        info!(query, top_k, returned = results.len(), "Semantic search completed");

        Ok(results)
    }

    /// Deletes and re-indexes a character; a failed re-index leaves it
    /// unindexed
    pub async fn reindex_character(&self, character_id: i64) -> Result<bool, DomainError> {
        self.embeddings.delete(character_id).await?;
        Ok(self.index_character(character_id).await)
    }

    pub async fn indexed_count(&self) -> Result<u64, DomainError> {
        self.embeddings.count().await
    }

    pub async fn is_indexed(&self, character_id: i64) -> Result<bool, DomainError> {
        self.embeddings.exists(character_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::{MockEmbeddingProvider, TaskType};
    use crate::domain::index::MockEmbeddingRepository;
    use crate::domain::multiverse::{MockGateway, fixtures};
    use crate::infrastructure::index::SqliteEmbeddingRepository;
    use crate::infrastructure::storage::testing::migrated_pool;

    fn characters() -> Vec<Character> {
        let mut rick = fixtures::character(1, "Rick Sanchez");
        rick.species = "Human".into();
        let mut morty = fixtures::character(2, "Morty Smith");
        morty.status = "Unknown".into();
        let mut birdperson = fixtures::character(3, "Birdperson");
        birdperson.species = "Bird-Person".into();
        vec![rick, morty, birdperson]
    }

    fn gateway() -> MockGateway {
        characters()
            .into_iter()
            .fold(MockGateway::new(), |g, c| g.with_character(c))
    }

    /// Provider with fixed vectors: character 1 points along x, 2 along y,
    /// 3 along z, and "genius scientist" mostly along x
    fn provider() -> MockEmbeddingProvider {
        let axes = [vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]];

        characters()
            .iter()
            .zip(axes)
            .fold(MockEmbeddingProvider::new(3), |p, (c, v)| {
                p.with_vector(c.description(), v)
            })
            .with_vector("genius scientist", vec![0.9, 0.3, 0.1])
    }

    async fn service_with(
        gateway: Arc<MockGateway>,
        provider: Arc<MockEmbeddingProvider>,
    ) -> (SearchService, Arc<SqliteEmbeddingRepository>) {
        let repo = Arc::new(SqliteEmbeddingRepository::new(migrated_pool().await));
        let service = SearchService::new(gateway, repo.clone(), provider);
        (service, repo)
    }

    #[tokio::test]
    async fn test_search_on_empty_index() {
        let provider = Arc::new(provider());
        let (service, _) = service_with(Arc::new(gateway()), provider.clone()).await;

        let result = service.search("anything", 5).await;

        assert!(matches!(result, Err(DomainError::EmptyIndex)));
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn test_closest_character_ranks_first() {
        let (service, _) = service_with(Arc::new(gateway()), Arc::new(provider())).await;

        let report = service.index_characters(Some(vec![1, 2, 3])).await;
        assert_eq!(report.indexed_count, 3);

        let results = service.search("genius scientist", 1).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].character.id, 1);
        assert_eq!(results[0].metadata["species"], "Human");
    }

    #[tokio::test]
    async fn test_results_are_bounded_and_sorted() {
        let (service, _) = service_with(Arc::new(gateway()), Arc::new(provider())).await;
        service.index_characters(Some(vec![1, 2, 3])).await;

        for k in 0..5 {
            let results = service.search("genius scientist", k).await.unwrap();

            assert!(results.len() <= k);
            assert!(results.iter().all(|r| (-1.0..=1.0).contains(&r.similarity)));
            assert!(results.windows(2).all(|w| w[0].similarity >= w[1].similarity));
        }

        let ids: Vec<i64> = service
            .search("genius scientist", 3)
            .await
            .unwrap()
            .iter()
            .map(|r| r.character.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_embeddings_use_asymmetric_task_types() {
        let provider = Arc::new(provider());
        let (service, _) = service_with(Arc::new(gateway()), provider.clone()).await;

        assert!(service.index_character(1).await);
        service.search("genius scientist", 1).await.unwrap();

        let task_types: Vec<TaskType> = provider.requests().into_iter().map(|(_, t)| t).collect();
        assert_eq!(task_types, vec![TaskType::RetrievalDocument, TaskType::RetrievalQuery]);
    }

    #[tokio::test]
    async fn test_hydration_is_one_batch_and_drops_missing() {
        let gateway = Arc::new(gateway());
        let (service, repo) = service_with(gateway.clone(), Arc::new(provider())).await;
        service.index_characters(Some(vec![1, 2])).await;
        repo.save(&EmbeddingRecord::new(404, "Ghost", vec![1.0, 0.0, 0.0]))
            .await
            .unwrap();

        let results = service.search("genius scientist", 10).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.character.id != 404));
        assert_eq!(gateway.batch_calls(), vec![vec![1, 2, 404]]);
    }

    #[tokio::test]
    async fn test_index_characters_reports_failures() {
        let gateway = Arc::new(gateway().with_failing_id(2));
        let (service, _) = service_with(gateway, Arc::new(provider())).await;

        let report = service.index_characters(Some(vec![1, 2, 99])).await;

        assert_eq!(report.indexed_count, 1);
        let failed: Vec<i64> = report.errors.iter().map(|e| e.character_id).collect();
        assert_eq!(failed, vec![2, 99]);
        assert_eq!(report.errors[1].error, "Character not found");
    }

    #[tokio::test]
    async fn test_index_characters_default_range() {
        let (service, _) = service_with(Arc::new(gateway()), Arc::new(provider())).await;

        let report = service.index_characters(None).await;

        assert_eq!(report.attempted(), 50);
        assert_eq!(report.indexed_count, 3);
        assert_eq!(service.indexed_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_index_character_embedding_failure() {
        let provider = Arc::new(MockEmbeddingProvider::new(3).with_error("quota exceeded"));
        let (service, _) = service_with(Arc::new(gateway()), provider).await;

        assert!(!service.index_character(1).await);
        assert!(!service.is_indexed(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_reindex_keeps_one_record() {
        let (service, _) = service_with(Arc::new(gateway()), Arc::new(provider())).await;
        service.index_characters(Some(vec![1, 2])).await;
        let before = service.indexed_count().await.unwrap();

        assert!(service.reindex_character(1).await.unwrap());

        assert_eq!(service.indexed_count().await.unwrap(), before);
        assert!(service.is_indexed(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_reindex_leaves_character_unindexed() {
        let pool = migrated_pool().await;
        let repo = Arc::new(SqliteEmbeddingRepository::new(pool));
        repo.save(&EmbeddingRecord::new(2, "Morty Smith", vec![0.0, 1.0, 0.0]))
            .await
            .unwrap();

        let gateway = Arc::new(gateway().with_failing_id(2));
        let service = SearchService::new(gateway, repo.clone(), Arc::new(provider()));

        assert!(!service.reindex_character(2).await.unwrap());
        assert!(!service.is_indexed(2).await.unwrap());
    }

    #[tokio::test]
    async fn test_storage_fault_propagates() {
        let mut repo = MockEmbeddingRepository::new();
        repo.expect_get_all()
            .returning(|| Err(DomainError::storage("disk I/O error")));

        let service = SearchService::new(Arc::new(gateway()), Arc::new(repo), Arc::new(provider()));

        let result = service.search("anything", 5).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
