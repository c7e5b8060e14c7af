//! Semantic search endpoints

use axum::{
    body::Bytes,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ValidatedJson, validate_request};
use crate::domain::index::EmbeddingMetadata;
use crate::domain::multiverse::Character;
use crate::domain::search::{IndexReport, SearchResult};
use crate::infrastructure::services::DEFAULT_TOP_K;

/// Body of an indexing run; an empty body indexes the default id range
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct IndexCharactersRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 1000))]
    pub character_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SemanticSearchRequest {
    #[validate(length(min = 1, max = 1000))]
    pub query: String,
    #[serde(default)]
    #[validate(range(min = 1, max = 100))]
    pub top_k: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub character_id: i64,
    pub character_name: String,
    pub similarity: f32,
    pub metadata: EmbeddingMetadata,
    pub character: Character,
}

impl From<SearchResult> for SearchHit {
    fn from(result: SearchResult) -> Self {
        Self {
            character_id: result.character.id,
            character_name: result.character.name.clone(),
            similarity: result.similarity,
            metadata: result.metadata,
            character: result.character,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SemanticSearchResponse {
    pub query: String,
    pub count: usize,
    pub data: Vec<SearchHit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexStatusResponse {
    pub indexed_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReindexResponse {
    pub character_id: i64,
    pub success: bool,
}

fn parse_index_request(body: &[u8]) -> Result<IndexCharactersRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(IndexCharactersRequest::default());
    }

    let request: IndexCharactersRequest = serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON data: {}", e)))?;
    validate_request(&request)?;

    Ok(request)
}

/// POST /api/search/index-characters
pub async fn index_characters(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<IndexReport>, ApiError> {
    let request = parse_index_request(&body)?;
    let report = state.search()?.index_characters(request.character_ids).await;
    Ok(Json(report))
}

/// POST /api/search/semantic
pub async fn semantic_search(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SemanticSearchRequest>,
) -> Result<Json<SemanticSearchResponse>, ApiError> {
    let top_k = request.top_k.unwrap_or(DEFAULT_TOP_K);
    let results = state.search()?.search(&request.query, top_k).await?;

    Ok(Json(SemanticSearchResponse {
        query: request.query,
        count: results.len(),
        data: results.into_iter().map(SearchHit::from).collect(),
    }))
}

/// GET /api/search/status
pub async fn index_status(
    State(state): State<AppState>,
) -> Result<Json<IndexStatusResponse>, ApiError> {
    let indexed_count = state.search()?.indexed_count().await?;
    Ok(Json(IndexStatusResponse { indexed_count }))
}

/// POST /api/search/reindex/{id}
pub async fn reindex_character(
    State(state): State<AppState>,
    Path(character_id): Path<i64>,
) -> Result<Json<ReindexResponse>, ApiError> {
    let success = state.search()?.reindex_character(character_id).await?;
    Ok(Json(ReindexResponse {
        character_id,
        success,
    }))
}
