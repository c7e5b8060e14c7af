//! Character endpoints

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, validate_request};
use crate::domain::multiverse::Character;
use crate::domain::note::Note;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CharacterSearchQuery {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name parameter is required"))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacterListResponse {
    pub count: usize,
    pub data: Vec<Character>,
}

impl From<Vec<Character>> for CharacterListResponse {
    fn from(data: Vec<Character>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacterDetailResponse {
    pub character: Character,
    pub notes: Vec<Note>,
}

/// GET /api/characters/{id}
pub async fn get_character(
    State(state): State<AppState>,
    Path(character_id): Path<i64>,
) -> Result<Json<CharacterDetailResponse>, ApiError> {
    debug!(character_id, "Fetching character with notes");

    let character = state.gateway.get_character(character_id).await?;
    let notes = state.notes.list_for_character(character_id).await?;

    Ok(Json(CharacterDetailResponse { character, notes }))
}

/// GET /api/characters/search?name=
pub async fn search_characters(
    State(state): State<AppState>,
    Query(query): Query<CharacterSearchQuery>,
) -> Result<Json<CharacterListResponse>, ApiError> {
    validate_request(&query)?;

    let characters = state.gateway.search_characters(&query.name).await?;

    Ok(Json(characters.into()))
}
