//! Embedding provider domain models and traits

mod provider;
mod request;
mod response;

pub use provider::EmbeddingProvider;
pub use request::{EmbeddingRequest, TaskType};
pub use response::{Embedding, cosine_similarity};

#[cfg(test)]
pub use provider::mock::MockEmbeddingProvider;
