//! Note repository trait

use async_trait::async_trait;

use super::Note;
use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for character note persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Creates a note, returning its id
    async fn create(
        &self,
        character_id: i64,
        character_name: &str,
        note: &str,
    ) -> Result<i64, DomainError>;

    /// Lists a character's notes, newest first
    async fn list_for_character(&self, character_id: i64) -> Result<Vec<Note>, DomainError>;

    async fn get(&self, note_id: i64) -> Result<Option<Note>, DomainError>;

    /// Replaces a note's text, returning false if the note does not exist
    async fn update(&self, note_id: i64, note: &str) -> Result<bool, DomainError>;

    /// Deletes a note, returning false if the note does not exist
    async fn delete(&self, note_id: i64) -> Result<bool, DomainError>;
}
