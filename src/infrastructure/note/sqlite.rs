//! SQLite-backed note repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqliteRow};

use crate::domain::DomainError;
use crate::domain::note::{Note, NoteRepository};

#[derive(Debug, Clone)]
pub struct SqliteNoteRepository {
    pool: SqlitePool,
}

impl SqliteNoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_note(row: &SqliteRow) -> Note {
        Note {
            id: row.get("id"),
            character_id: row.get("character_id"),
            character_name: row.get("character_name"),
            note: row.get("note"),
            created_at: row.get::<DateTime<Utc>, _>("created_at"),
            updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
        }
    }
}

#[async_trait]
impl NoteRepository for SqliteNoteRepository {
    async fn create(
        &self,
        character_id: i64,
        character_name: &str,
        note: &str,
    ) -> Result<i64, DomainError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO character_notes (character_id, character_name, note, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(character_id)
        .bind(character_name)
        .bind(note)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create note: {}", e)))?;

        Ok(result.last_insert_rowid())
    }

    async fn list_for_character(&self, character_id: i64) -> Result<Vec<Note>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, character_id, character_name, note, created_at, updated_at \
             FROM character_notes WHERE character_id = ? \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(character_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list notes: {}", e)))?;

        Ok(rows.iter().map(Self::row_to_note).collect())
    }

    async fn get(&self, note_id: i64) -> Result<Option<Note>, DomainError> {
        let row = sqlx::query(
            "SELECT id, character_id, character_name, note, created_at, updated_at \
             FROM character_notes WHERE id = ?",
        )
        .bind(note_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get note: {}", e)))?;

        Ok(row.as_ref().map(Self::row_to_note))
    }

    async fn update(&self, note_id: i64, note: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE character_notes SET note = ?, updated_at = ? WHERE id = ?")
            .bind(note)
            .bind(Utc::now())
            .bind(note_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update note: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, note_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM character_notes WHERE id = ?")
            .bind(note_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete note: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::testing::migrated_pool;

    async fn repository() -> SqliteNoteRepository {
        SqliteNoteRepository::new(migrated_pool().await)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = repository().await;

        let id = repo.create(1, "Rick Sanchez", "Smartest man alive").await.unwrap();
        let note = repo.get(id).await.unwrap().unwrap();

        assert_eq!(note.character_id, 1);
        assert_eq!(note.character_name, "Rick Sanchez");
        assert_eq!(note.note, "Smartest man alive");
        assert_eq!(note.created_at, note.updated_at);
    }

    #[tokio::test]
    async fn test_list_for_character_newest_first() {
        let repo = repository().await;

        let first = repo.create(1, "Rick", "first").await.unwrap();
        let second = repo.create(1, "Rick", "second").await.unwrap();
        repo.create(2, "Morty", "other").await.unwrap();

        let notes = repo.list_for_character(1).await.unwrap();
        let ids: Vec<i64> = notes.iter().map(|n| n.id).collect();

        assert_eq!(ids, vec![second, first]);
    }

    #[tokio::test]
    async fn test_update_refreshes_text_and_timestamp() {
        let repo = repository().await;
        let id = repo.create(1, "Rick", "draft").await.unwrap();
        let before = repo.get(id).await.unwrap().unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        assert!(repo.update(id, "final").await.unwrap());

        let after = repo.get(id).await.unwrap().unwrap();
        assert_eq!(after.note, "final");
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = repository().await;

        assert!(!repo.update(99, "x").await.unwrap());
        assert!(!repo.delete(99).await.unwrap());
        assert!(repo.get(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repository().await;
        let id = repo.create(1, "Rick", "gone soon").await.unwrap();

        assert!(repo.delete(id).await.unwrap());
        assert!(repo.list_for_character(1).await.unwrap().is_empty());
    }
}
