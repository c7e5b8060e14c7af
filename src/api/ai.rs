//! Generative endpoints backed by the narration service

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ValidatedJson};
use crate::domain::multiverse::{Character, Location};
use crate::domain::narration::{
    EvaluationResult, ImageOptions, dialogue_scene_prompt, image_url, location_scene_prompt,
};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ImagePromptQuery {
    /// Ask the generator to write the image prompt instead of the fixed one
    #[serde(default)]
    pub generate_image_prompt: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationSummaryResponse {
    pub location: Location,
    pub summary: String,
    pub image_prompt: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacterAnalysisResponse {
    pub character: Character,
    pub analysis: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DialogueRequest {
    #[validate(range(min = 1))]
    pub character1_id: i64,
    #[validate(range(min = 1))]
    pub character2_id: i64,
    #[serde(default)]
    pub generate_image_prompt: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DialogueResponse {
    pub character1_image: String,
    pub character2_image: String,
    pub character1: Character,
    pub character2: Character,
    pub dialogue: String,
    pub scene_image_url: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FactualConsistencyRequest {
    #[validate(length(min = 1))]
    pub generated_text: String,
    pub source_data: Value,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreativityRequest {
    #[validate(length(min = 1))]
    pub generated_text: String,
}

/// GET /api/ai/location-summary/{id}
pub async fn location_summary(
    State(state): State<AppState>,
    Path(location_id): Path<i64>,
    Query(query): Query<ImagePromptQuery>,
) -> Result<Json<LocationSummaryResponse>, ApiError> {
    let narration = state.narration()?;
    let location = state.gateway.get_location(location_id).await?;
    let summary = narration.location_summary(&location).await?;

    let image_prompt = if query.generate_image_prompt {
        narration.location_image_prompt(&location, &summary).await?
    } else {
        location_scene_prompt(&location)
    };
    let image_url = image_url(&image_prompt, &ImageOptions::default())?;

    Ok(Json(LocationSummaryResponse {
        location,
        summary,
        image_prompt,
        image_url,
    }))
}

/// GET /api/ai/character-analysis/{id}
pub async fn character_analysis(
    State(state): State<AppState>,
    Path(character_id): Path<i64>,
) -> Result<Json<CharacterAnalysisResponse>, ApiError> {
    let narration = state.narration()?;
    let character = state.gateway.get_character(character_id).await?;
    let analysis = narration.character_analysis(&character).await?;

    Ok(Json(CharacterAnalysisResponse {
        character,
        analysis,
    }))
}

/// POST /api/ai/character-dialogue
pub async fn character_dialogue(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<DialogueRequest>,
) -> Result<Json<DialogueResponse>, ApiError> {
    let narration = state.narration()?;
    let first = state.gateway.get_character(request.character1_id).await?;
    let second = state.gateway.get_character(request.character2_id).await?;

    let dialogue = narration.dialogue(&first, &second).await?;

    let scene_prompt = if request.generate_image_prompt {
        narration
            .dialogue_image_prompt(&first, &second, &dialogue)
            .await?
    } else {
        dialogue_scene_prompt(&first, &second)
    };
    let scene_image_url = image_url(&scene_prompt, &ImageOptions::default())?;

    Ok(Json(DialogueResponse {
        character1_image: first.image.clone(),
        character2_image: second.image.clone(),
        character1: first,
        character2: second,
        dialogue,
        scene_image_url,
    }))
}

/// POST /api/ai/eval/factual-consistency
pub async fn evaluate_factual_consistency(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<FactualConsistencyRequest>,
) -> Result<Json<EvaluationResult>, ApiError> {
    let result = state
        .narration()?
        .evaluate_factual_consistency(&request.generated_text, &request.source_data)
        .await?;
    Ok(Json(result))
}

/// POST /api/ai/eval/creativity
pub async fn evaluate_creativity(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreativityRequest>,
) -> Result<Json<EvaluationResult>, ApiError> {
    let result = state
        .narration()?
        .evaluate_creativity(&request.generated_text)
        .await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dialogue_request_validation() {
        let request: DialogueRequest =
            serde_json::from_value(json!({"character1_id": 1, "character2_id": 2})).unwrap();
        assert!(request.validate().is_ok());
        assert!(!request.generate_image_prompt);

        let request: DialogueRequest =
            serde_json::from_value(json!({"character1_id": 1, "character2_id": -4})).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_eval_requests_require_text() {
        let request: CreativityRequest =
            serde_json::from_value(json!({"generated_text": ""})).unwrap();
        assert!(request.validate().is_err());

        let missing: Result<FactualConsistencyRequest, _> =
            serde_json::from_value(json!({"generated_text": "Rick is alive."}));
        assert!(missing.is_err());

        let request: FactualConsistencyRequest = serde_json::from_value(json!({
            "generated_text": "Rick is alive.",
            "source_data": {"status": "Alive"}
        }))
        .unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_image_prompt_query_default() {
        let query: ImagePromptQuery = serde_json::from_str("{}").unwrap();
        assert!(!query.generate_image_prompt);
    }
}
