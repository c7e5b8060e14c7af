//! Show-flavoured narration and self-evaluation on top of a text generator

use std::sync::Arc;

use tracing::debug;

use crate::domain::DomainError;
use crate::domain::llm::TextGenerator;
use crate::domain::multiverse::{Character, Location};
use crate::domain::narration::{EvaluationResult, prompts};

/// Generates summaries, analyses and dialogue, and scores generated text
#[derive(Debug, Clone)]
pub struct NarrationService {
    generator: Arc<dyn TextGenerator>,
}

impl NarrationService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    async fn complete(&self, kind: &'static str, prompt: String) -> Result<String, DomainError> {
        debug!(
            kind,
            provider = self.generator.provider_name(),
            prompt_chars = prompt.len(),
            "Generating narration"
        );
        self.generator.generate(&prompt).await
    }

    pub async fn location_summary(&self, location: &Location) -> Result<String, DomainError> {
        self.complete("location_summary", prompts::location_summary(location))
            .await
    }

    /// Asks the generator for an image prompt describing the location
    pub async fn location_image_prompt(
        &self,
        location: &Location,
        summary: &str,
    ) -> Result<String, DomainError> {
        let prompt = self
            .complete("location_image", prompts::location_image(location, summary))
            .await?;
        Ok(prompt.trim().to_string())
    }

    pub async fn character_analysis(&self, character: &Character) -> Result<String, DomainError> {
        self.complete("character_analysis", prompts::character_analysis(character))
            .await
    }

    pub async fn dialogue(
        &self,
        first: &Character,
        second: &Character,
    ) -> Result<String, DomainError> {
        self.complete("dialogue", prompts::dialogue(first, second))
            .await
    }

    pub async fn dialogue_image_prompt(
        &self,
        first: &Character,
        second: &Character,
        dialogue: &str,
    ) -> Result<String, DomainError> {
        let prompt = self
            .complete(
                "dialogue_image",
                prompts::dialogue_image(first, second, dialogue),
            )
            .await?;
        Ok(prompt.trim().to_string())
    }

    /// Scores how well `generated_text` agrees with `source_data`
    pub async fn evaluate_factual_consistency(
        &self,
        generated_text: &str,
        source_data: &serde_json::Value,
    ) -> Result<EvaluationResult, DomainError> {
        let reply = self
            .complete(
                "eval_factual_consistency",
                prompts::factual_consistency(generated_text, source_data),
            )
            .await?;
        Ok(EvaluationResult::parse(&reply))
    }

    pub async fn evaluate_creativity(
        &self,
        generated_text: &str,
    ) -> Result<EvaluationResult, DomainError> {
        let reply = self
            .complete("eval_creativity", prompts::creativity(generated_text))
            .await?;
        Ok(EvaluationResult::parse(&reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockTextGenerator;
    use crate::domain::multiverse::fixtures;
    use serde_json::json;

    fn service(generator: MockTextGenerator) -> (NarrationService, Arc<MockTextGenerator>) {
        let generator = Arc::new(generator);
        (NarrationService::new(generator.clone()), generator)
    }

    #[tokio::test]
    async fn test_location_summary_prompt_carries_location() {
        let (service, generator) =
            service(MockTextGenerator::new().with_response("Earth. Again. Great."));
        let location = fixtures::location(1, "Earth (C-137)", &[1, 2]);

        let summary = service.location_summary(&location).await.unwrap();

        assert_eq!(summary, "Earth. Again. Great.");
        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Name: Earth (C-137)"));
        assert!(prompts[0].contains("Number of Residents: 2"));
    }

    #[tokio::test]
    async fn test_image_prompts_are_trimmed() {
        let (service, _) = service(MockTextGenerator::new().with_response("  A green portal.\n"));
        let location = fixtures::location(3, "Citadel of Ricks", &[]);
        let rick = fixtures::character(1, "Rick Sanchez");
        let morty = fixtures::character(2, "Morty Smith");

        assert_eq!(
            service.location_image_prompt(&location, "summary").await.unwrap(),
            "A green portal."
        );
        assert_eq!(
            service
                .dialogue_image_prompt(&rick, &morty, "Rick: Wubba lubba dub dub")
                .await
                .unwrap(),
            "A green portal."
        );
    }

    #[tokio::test]
    async fn test_dialogue_names_both_characters() {
        let (service, generator) =
            service(MockTextGenerator::new().with_response("Rick: Morty!\nMorty: Aw geez."));
        let rick = fixtures::character(1, "Rick Sanchez");
        let morty = fixtures::character(2, "Morty Smith");

        service.dialogue(&rick, &morty).await.unwrap();

        let prompt = &generator.prompts()[0];
        assert!(prompt.contains("Rick Sanchez: [their line]"));
        assert!(prompt.contains("Morty Smith: [their line]"));
    }

    #[tokio::test]
    async fn test_factual_consistency_is_parsed() {
        let reply = "Score: 8\nReasoning: Mostly accurate.\nIssues: None";
        let (service, generator) = service(MockTextGenerator::new().with_response(reply));

        let result = service
            .evaluate_factual_consistency("Rick is alive.", &json!({"status": "Alive"}))
            .await
            .unwrap();

        assert_eq!(result.score, 8);
        assert_eq!(result.reasoning, "Mostly accurate.");
        assert_eq!(result.details["Issues"], "None");
        assert!(generator.prompts()[0].contains("\"status\": \"Alive\""));
    }

    #[tokio::test]
    async fn test_creativity_without_score() {
        let (service, _) =
            service(MockTextGenerator::new().with_response("Reasoning: Could not decide."));

        let result = service.evaluate_creativity("Some text").await.unwrap();

        assert_eq!(result.score, 0);
        assert_eq!(result.reasoning, "Could not decide.");
    }

    #[tokio::test]
    async fn test_generator_failure_propagates() {
        let (service, _) = service(MockTextGenerator::new().with_error("quota exceeded"));
        let rick = fixtures::character(1, "Rick Sanchez");

        let result = service.character_analysis(&rick).await;

        assert!(matches!(result, Err(DomainError::ExternalService { .. })));
    }
}
