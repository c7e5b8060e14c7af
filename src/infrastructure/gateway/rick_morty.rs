//! Rick and Morty REST API gateway with response caching

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::DomainError;
use crate::domain::cache::{CacheKeyParams, CacheStore, CacheStoreExt, UPSTREAM_NAMESPACE};
use crate::domain::multiverse::{Character, Location, MultiverseGateway, OneOrMany, Page};

/// Most ids the upstream accepts in one multi-id request
pub const MAX_UPSTREAM_BATCH: usize = 100;

/// Upstream connection settings
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub cache_ttl_minutes: i64,
    /// Most ids sent in one multi-id request, capped at `MAX_UPSTREAM_BATCH`
    pub max_batch_size: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://rickandmortyapi.com/api".to_string(),
            request_timeout: Duration::from_secs(10),
            cache_ttl_minutes: 60,
            max_batch_size: MAX_UPSTREAM_BATCH,
        }
    }
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_cache_ttl_minutes(mut self, minutes: i64) -> Self {
        self.cache_ttl_minutes = minutes;
        self
    }

    pub fn with_max_batch_size(mut self, size: usize) -> Self {
        self.max_batch_size = size.clamp(1, MAX_UPSTREAM_BATCH);
        self
    }

    fn batch_size(&self) -> usize {
        self.max_batch_size.clamp(1, MAX_UPSTREAM_BATCH)
    }
}

/// Gateway to the Rick and Morty API
///
/// Every read except name search goes through the cache first. Cache writes
/// that fail are logged and otherwise ignored.
#[derive(Debug)]
pub struct RickMortyGateway {
    client: reqwest::Client,
    cache: Arc<dyn CacheStore>,
    config: GatewayConfig,
}

impl RickMortyGateway {
    pub fn new(config: GatewayConfig, cache: Arc<dyn CacheStore>) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            cache,
            config,
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Fetches `{base_url}/{resource}` with the given query
    ///
    /// A 404 becomes `NotFound` named after the first path segment. Any other
    /// failure, a timeout included, is `ExternalService`.
    pub async fn fetch(
        &self,
        resource: &str,
        query: &[(&str, String)],
        use_cache: bool,
    ) -> Result<Value, DomainError> {
        let cache_key =
            CacheKeyParams::from_request(resource, query).generate_with_namespace(UPSTREAM_NAMESPACE);

        if use_cache {
            if let Some(cached) = self.cache.get_json::<Value>(&cache_key).await {
                debug!(key = %cache_key, "Cache hit");
                return Ok(cached);
            }
            debug!(key = %cache_key, "Cache miss");
        }

        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), resource);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::external_service(format!("Request to {} timed out", url))
                } else {
                    DomainError::external_service(format!("Network error: {}", e))
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DomainError::not_found(resource_name(resource)));
        }

        if !status.is_success() {
            return Err(DomainError::external_service(format!(
                "Rick and Morty API error: HTTP {} for {}",
                status, url
            )));
        }

        let data: Value = response.json().await.map_err(|e| {
            DomainError::external_service(format!("Failed to parse upstream response: {}", e))
        })?;

        if use_cache {
            if let Err(e) = self
                .cache
                .set_json(&cache_key, &data, self.config.cache_ttl_minutes)
                .await
            {
                warn!(key = %cache_key, error = %e, "Failed to cache upstream response");
            }
        }

        Ok(data)
    }

    async fn fetch_as<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, String)],
        use_cache: bool,
    ) -> Result<T, DomainError> {
        let data = self.fetch(resource, query, use_cache).await?;
        decode(data, resource)
    }

    /// Walks `?page=N` until the envelope has no `next` link
    async fn fetch_all_pages<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>, DomainError> {
        let mut items = Vec::new();
        let mut page_number: u64 = 1;

        loop {
            let page: Page<T> = self
                .fetch_as(resource, &[("page", page_number.to_string())], true)
                .await?;
            let has_next = page.has_next();
            items.extend(page.results);

            if !has_next {
                break;
            }
            page_number += 1;
        }

        debug!(resource, pages = page_number, count = items.len(), "Fetched all pages");
        Ok(items)
    }

    async fn fetch_chunk(&self, ids: &[i64]) -> Result<Vec<Character>, DomainError> {
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let characters: OneOrMany<Character> =
            self.fetch_as(&format!("character/{}", joined), &[], true).await?;
        Ok(characters.into_vec())
    }
}

/// Title-cased first path segment: `character/1` becomes `Character`
fn resource_name(resource: &str) -> String {
    let segment = resource.split('/').next().unwrap_or(resource);
    let mut chars = segment.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn decode<T: DeserializeOwned>(data: Value, resource: &str) -> Result<T, DomainError> {
    serde_json::from_value(data).map_err(|e| {
        DomainError::external_service(format!("Unexpected payload for {}: {}", resource, e))
    })
}

#[async_trait]
impl MultiverseGateway for RickMortyGateway {
    async fn get_character(&self, id: i64) -> Result<Character, DomainError> {
        self.fetch_as(&format!("character/{}", id), &[], true).await
    }

    async fn get_characters_batch(&self, ids: &[i64]) -> Result<Vec<Character>, DomainError> {
        let mut characters = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(self.config.batch_size()) {
            match self.fetch_chunk(chunk).await {
                Ok(found) => characters.extend(found),
                Err(e @ (DomainError::NotFound { .. } | DomainError::ExternalService { .. })) => {
                    warn!(chunk_size = chunk.len(), error = %e, "Skipping failed character batch");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(characters)
    }

    async fn get_all_characters(&self) -> Result<Vec<Character>, DomainError> {
        self.fetch_all_pages("character").await
    }

    async fn search_characters(&self, name: &str) -> Result<Vec<Character>, DomainError> {
        match self
            .fetch_as::<Page<Character>>("character", &[("name", name.to_string())], false)
            .await
        {
            Ok(page) => Ok(page.results),
            Err(DomainError::NotFound { .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    async fn get_location(&self, id: i64) -> Result<Location, DomainError> {
        self.fetch_as(&format!("location/{}", id), &[], true).await
    }

    async fn get_all_locations(&self) -> Result<Vec<Location>, DomainError> {
        self.fetch_all_pages("location").await
    }

    async fn get_location_with_residents(&self, id: i64) -> Result<Location, DomainError> {
        let location = self.get_location(id).await?;
        let residents = self.get_characters_batch(&location.resident_ids()).await?;

        Ok(location.with_residents(residents))
    }

    async fn get_all_locations_with_residents(&self) -> Result<Vec<Location>, DomainError> {
        let locations = self.get_all_locations().await?;

        let unique_ids: Vec<i64> = locations
            .iter()
            .flat_map(Location::resident_ids)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let by_id: std::collections::HashMap<i64, Character> = self
            .get_characters_batch(&unique_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        Ok(locations
            .into_iter()
            .map(|location| {
                let residents = location
                    .resident_ids()
                    .iter()
                    .filter_map(|id| by_id.get(id).cloned())
                    .collect();
                location.with_residents(residents)
            })
            .collect())
    }
}
