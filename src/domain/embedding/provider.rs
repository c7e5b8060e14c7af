//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::{Embedding, EmbeddingRequest};
use crate::domain::DomainError;

/// Trait for services that turn text into a vector
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Embeds the request's text
    async fn embed(&self, request: EmbeddingRequest) -> Result<Embedding, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Model used when the caller does not pick one
    fn model(&self) -> &str;
}
