//! Domain layer - Core business logic and entities

pub mod cache;
pub mod embedding;
pub mod error;
pub mod index;
pub mod llm;
pub mod multiverse;
pub mod narration;
pub mod note;
pub mod search;

pub use cache::{CacheKeyParams, CacheStore, CacheStoreExt};
pub use embedding::{Embedding, EmbeddingProvider, EmbeddingRequest, TaskType, cosine_similarity};
pub use error::DomainError;
pub use index::{EmbeddingMetadata, EmbeddingRecord, EmbeddingRepository};
pub use llm::TextGenerator;
pub use multiverse::{Character, Location, MultiverseGateway};
pub use narration::{EvaluationResult, ImageOptions};
pub use note::{Note, NoteRepository};
pub use search::{IndexFailure, IndexReport, SearchResult};
