//! Text generation trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for services that complete a prompt into text
#[async_trait]
pub trait TextGenerator: Send + Sync + Debug {
    /// Generates a completion for a single prompt
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
