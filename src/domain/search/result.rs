//! Search and indexing result types

use serde::{Deserialize, Serialize};

use crate::domain::index::EmbeddingMetadata;
use crate::domain::multiverse::Character;

/// A ranked hit from semantic search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub character: Character,
    /// Cosine similarity to the query, in [-1.0, 1.0]
    pub similarity: f32,
    pub metadata: EmbeddingMetadata,
}

/// Why a single character could not be indexed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexFailure {
    pub character_id: i64,
    pub error: String,
}

/// Outcome of a batch indexing run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexReport {
    pub indexed_count: usize,
    pub errors: Vec<IndexFailure>,
}

impl IndexReport {
    pub fn record_success(&mut self) {
        self.indexed_count += 1;
    }

    pub fn record_failure(&mut self, character_id: i64, error: impl Into<String>) {
        self.errors.push(IndexFailure {
            character_id,
            error: error.into(),
        });
    }

    pub fn attempted(&self) -> usize {
        self.indexed_count + self.errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_report_counts() {
        let mut report = IndexReport::default();
        report.record_success();
        report.record_success();
        report.record_failure(3, "Character not found");

        assert_eq!(report.indexed_count, 2);
        assert_eq!(report.attempted(), 3);
        assert_eq!(report.errors[0].character_id, 3);
    }

    #[test]
    fn test_index_report_serialization() {
        let mut report = IndexReport::default();
        report.record_failure(7, "boom");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["indexed_count"], 0);
        assert_eq!(json["errors"][0]["character_id"], 7);
        assert_eq!(json["errors"][0]["error"], "boom");
    }
}
