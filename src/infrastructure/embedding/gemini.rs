//! Gemini embedding provider implementation

use async_trait::async_trait;
use serde::Deserialize;

use super::HttpClientTrait;
use crate::domain::DomainError;
use crate::domain::embedding::{Embedding, EmbeddingProvider, EmbeddingRequest};
use crate::infrastructure::llm::{DEFAULT_GEMINI_BASE_URL, model_path};

pub const DEFAULT_EMBEDDING_MODEL: &str = "models/text-embedding-004";

/// Gemini `embedContent` client
#[derive(Debug)]
pub struct GeminiEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
    model: String,
}

impl<C: HttpClientTrait> GeminiEmbeddingProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: model_path(&model.into()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn embed_url(&self, model: &str) -> String {
        format!("{}/{}:embedContent", self.base_url, model)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("x-goog-api-key", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn build_request(&self, model: &str, request: &EmbeddingRequest) -> serde_json::Value {
        serde_json::json!({
            "model": model,
            "content": {
                "parts": [{"text": request.text()}]
            },
            "taskType": request.task_type().as_str()
        })
    }

    fn parse_response(&self, model: &str, json: serde_json::Value) -> Result<Embedding, DomainError> {
        let response: EmbedContentResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::external_service(format!("Failed to parse embedding response: {}", e))
        })?;

        if response.embedding.values.is_empty() {
            return Err(DomainError::external_service("Gemini returned an empty embedding"));
        }

        Ok(Embedding::new(model, response.embedding.values))
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for GeminiEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<Embedding, DomainError> {
        let model = if request.model().is_empty() {
            self.model.clone()
        } else {
            model_path(request.model())
        };
        let body = self.build_request(&model, &request);

        let response = self
            .client
            .post_json(&self.embed_url(&model), self.headers(), &body)
            .await?;

        self.parse_response(&model, response)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Gemini API types for embedContent

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    #[serde(default)]
    values: Vec<f32>,
}
