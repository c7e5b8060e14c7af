//! Embedding request types

use serde::{Deserialize, Serialize};

/// What the embedding is going to be used for
///
/// Providers may produce different vectors for the same text depending on
/// whether it is a stored document or a search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    RetrievalDocument,
    RetrievalQuery,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RetrievalDocument => "RETRIEVAL_DOCUMENT",
            Self::RetrievalQuery => "RETRIEVAL_QUERY",
        }
    }
}

/// Request to embed one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    model: String,
    text: String,
    task_type: TaskType,
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>, text: impl Into<String>, task_type: TaskType) -> Self {
        Self {
            model: model.into(),
            text: text.into(),
            task_type,
        }
    }

    /// Request for text that will be stored and searched against
    pub fn document(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(model, text, TaskType::RetrievalDocument)
    }

    /// Request for a search query
    pub fn query(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(model, text, TaskType::RetrievalQuery)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn task_type(&self) -> TaskType {
        self.task_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_and_query_constructors() {
        let doc = EmbeddingRequest::document("models/text-embedding-004", "Rick");
        assert_eq!(doc.task_type(), TaskType::RetrievalDocument);
        assert_eq!(doc.model(), "models/text-embedding-004");

        let query = EmbeddingRequest::query("models/text-embedding-004", "scientist");
        assert_eq!(query.task_type(), TaskType::RetrievalQuery);
        assert_eq!(query.text(), "scientist");
    }

    #[test]
    fn test_task_type_wire_names() {
        assert_eq!(TaskType::RetrievalDocument.as_str(), "RETRIEVAL_DOCUMENT");
        assert_eq!(
            serde_json::to_string(&TaskType::RetrievalQuery).unwrap(),
            "\"RETRIEVAL_QUERY\""
        );
    }
}
