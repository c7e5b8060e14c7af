//! Infrastructure layer - External service implementations

pub mod cache;
pub mod embedding;
pub mod gateway;
pub mod index;
pub mod llm;
pub mod logging;
pub mod note;
pub mod services;
pub mod storage;
