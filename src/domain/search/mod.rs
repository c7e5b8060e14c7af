//! Semantic search domain types

mod result;

pub use result::{IndexFailure, IndexReport, SearchResult};
