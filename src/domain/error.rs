use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("External service error: {message}")]
    ExternalService { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("No character embeddings found. Please index characters first.")]
    EmptyIndex,

    #[error("AI service unavailable: {message}")]
    AiUnavailable { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn external_service(message: impl Into<String>) -> Self {
        Self::ExternalService {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn ai_unavailable(message: impl Into<String>) -> Self {
        Self::AiUnavailable {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Stable machine-readable kind, surfaced to API callers
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::ExternalService { .. } => "external_service_error",
            Self::Storage { .. } => "storage_error",
            Self::Validation { .. } => "validation_error",
            Self::EmptyIndex => "empty_index",
            Self::AiUnavailable { .. } => "ai_service_unavailable",
            Self::Configuration { .. } => "configuration_error",
            Self::Internal { .. } => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Character");
        assert_eq!(error.to_string(), "Character not found");
        assert_eq!(error.kind(), "not_found");
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Invalid input");
        assert_eq!(error.to_string(), "Validation error: Invalid input");
    }

    #[test]
    fn test_empty_index_error() {
        let error = DomainError::EmptyIndex;
        assert_eq!(error.kind(), "empty_index");
        assert!(error.to_string().contains("index characters first"));
    }
}
