//! Infrastructure services

mod narration_service;
mod search_service;

pub use narration_service::NarrationService;
pub use search_service::{DEFAULT_INDEX_IDS, DEFAULT_TOP_K, SearchService};
