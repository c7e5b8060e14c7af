//! Gateway trait for the upstream multiverse API

use async_trait::async_trait;
use std::fmt::Debug;

use super::{Character, Location};
use crate::domain::DomainError;

/// Typed read access to upstream characters and locations
#[async_trait]
pub trait MultiverseGateway: Send + Sync + Debug {
    /// Fetches one character; a missing id is `NotFound`
    async fn get_character(&self, id: i64) -> Result<Character, DomainError>;

    /// Fetches many characters by id with one request per chunk
    ///
    /// Chunks that fail are skipped, so the result may be partial. Order
    /// follows upstream.
    async fn get_characters_batch(&self, ids: &[i64]) -> Result<Vec<Character>, DomainError>;

    /// Fetches every character, following pagination
    async fn get_all_characters(&self) -> Result<Vec<Character>, DomainError>;

    /// Upstream name search; never cached, no match yields an empty list
    async fn search_characters(&self, name: &str) -> Result<Vec<Character>, DomainError>;

    async fn get_location(&self, id: i64) -> Result<Location, DomainError>;

    /// Fetches every location, following pagination
    async fn get_all_locations(&self) -> Result<Vec<Location>, DomainError>;

    /// Fetches a location with its resident characters attached
    async fn get_location_with_residents(&self, id: i64) -> Result<Location, DomainError>;

    /// Fetches every location with residents attached, resolving all
    /// residents in one chunked batch lookup
    async fn get_all_locations_with_residents(&self) -> Result<Vec<Location>, DomainError>;
}
