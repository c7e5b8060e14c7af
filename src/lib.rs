//! Multiverse Atlas
//!
//! Backend over the public Rick and Morty API with:
//! - A time-bounded response cache in SQLite (or in process memory)
//! - Paginated and batched character and location lookups
//! - Character embeddings and cosine-ranked semantic search
//! - Gemini-backed narration, evaluation and character notes

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use crate::api::state::AppState;
use crate::config::GeminiConfig;
use domain::{embedding::EmbeddingProvider, llm::TextGenerator};
use infrastructure::{
    cache::CacheStoreFactory,
    embedding::GeminiEmbeddingProvider,
    gateway::{GatewayConfig, RickMortyGateway},
    index::SqliteEmbeddingRepository,
    llm::{GeminiTextGenerator, HttpClient},
    note::SqliteNoteRepository,
    services::{NarrationService, SearchService},
    storage::{SqliteConfig, connect, run_storage_migrations},
};
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Create the application state from configuration
///
/// Opens the database and applies migrations. Search and narration are
/// wired only when a Gemini API key is configured.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = open_database(config).await?;

    let cache = CacheStoreFactory::new().create(config.cache.backend, &pool);
    info!(backend = %config.cache.backend, "Cache store ready");

    let gateway_config = GatewayConfig::new(&config.upstream.base_url)
        .with_timeout(Duration::from_secs(config.upstream.request_timeout_secs))
        .with_cache_ttl_minutes(config.upstream.cache_ttl_minutes)
        .with_max_batch_size(config.upstream.max_batch_size);
    let gateway = Arc::new(RickMortyGateway::new(gateway_config, cache.clone())?);

    let notes = Arc::new(SqliteNoteRepository::new(pool.clone()));
    let mut state = AppState::new(gateway.clone(), notes, cache);

    match config.gemini.api_key() {
        Some(api_key) => {
            let (generator, provider) = create_gemini_clients(&config.gemini, api_key)?;
            let embeddings = Arc::new(SqliteEmbeddingRepository::new(pool));

            state = state
                .with_search(Arc::new(SearchService::new(gateway, embeddings, provider)))
                .with_narration(Arc::new(NarrationService::new(generator)));
            info!(model = %config.gemini.model, "Gemini services enabled");
        }
        None => warn!("Gemini API key not configured; AI features disabled"),
    }

    Ok(state)
}

/// Connect to the configured database and bring its schema up to date
pub async fn open_database(config: &AppConfig) -> anyhow::Result<SqlitePool> {
    let sqlite = SqliteConfig::new(&config.database.path)
        .with_max_connections(config.database.max_connections);
    let pool = connect(&sqlite).await?;
    run_storage_migrations(&pool).await?;
    info!(path = %config.database.path, "Database ready");

    Ok(pool)
}

fn create_gemini_clients(
    config: &GeminiConfig,
    api_key: &str,
) -> anyhow::Result<(Arc<dyn TextGenerator>, Arc<dyn EmbeddingProvider>)> {
    let client = HttpClient::with_timeout(Duration::from_secs(config.request_timeout_secs))?;

    let generator: Arc<dyn TextGenerator> = Arc::new(
        GeminiTextGenerator::new(client.clone(), api_key, &config.model)
            .with_base_url(&config.base_url)
            .with_generation_config(config.max_output_tokens, config.temperature),
    );

    let provider: Arc<dyn EmbeddingProvider> = Arc::new(
        GeminiEmbeddingProvider::new(client, api_key, &config.embedding_model)
            .with_base_url(&config.base_url),
    );

    Ok((generator, provider))
}
