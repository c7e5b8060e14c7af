//! Application state for shared services

use std::sync::Arc;

use crate::domain::DomainError;
use crate::domain::cache::CacheStore;
use crate::domain::multiverse::MultiverseGateway;
use crate::domain::note::NoteRepository;
use crate::infrastructure::services::{NarrationService, SearchService};

const AI_UNAVAILABLE: &str = "Gemini API key is not configured";

/// Shared services; AI-backed services are absent without a Gemini key
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn MultiverseGateway>,
    pub notes: Arc<dyn NoteRepository>,
    pub cache: Arc<dyn CacheStore>,
    pub search: Option<Arc<SearchService>>,
    pub narration: Option<Arc<NarrationService>>,
}

impl AppState {
    pub fn new(
        gateway: Arc<dyn MultiverseGateway>,
        notes: Arc<dyn NoteRepository>,
        cache: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            gateway,
            notes,
            cache,
            search: None,
            narration: None,
        }
    }

    pub fn with_search(mut self, search: Arc<SearchService>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_narration(mut self, narration: Arc<NarrationService>) -> Self {
        self.narration = Some(narration);
        self
    }

    pub fn ai_available(&self) -> bool {
        self.search.is_some() && self.narration.is_some()
    }

    pub fn search(&self) -> Result<&SearchService, DomainError> {
        self.search
            .as_deref()
            .ok_or_else(|| DomainError::ai_unavailable(AI_UNAVAILABLE))
    }

    pub fn narration(&self) -> Result<&NarrationService, DomainError> {
        self.narration
            .as_deref()
            .ok_or_else(|| DomainError::ai_unavailable(AI_UNAVAILABLE))
    }
}
