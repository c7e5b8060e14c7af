//! Stored embedding record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata attached to an embedding (species, status, gender for characters)
pub type EmbeddingMetadata = Map<String, Value>;

/// One stored vector per entity id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub entity_id: i64,
    pub entity_name: String,
    pub vector: Vec<f32>,
    #[serde(default)]
    pub metadata: EmbeddingMetadata,
}

impl EmbeddingRecord {
    pub fn new(entity_id: i64, entity_name: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            entity_id,
            entity_name: entity_name.into(),
            vector,
            metadata: Map::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
