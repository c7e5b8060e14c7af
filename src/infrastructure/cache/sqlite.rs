//! SQLite-backed response cache

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqlitePool;

use crate::domain::DomainError;
use crate::domain::cache::CacheStore;

/// Cache store persisted in the `api_cache` table
///
/// Expiry is kept as unix milliseconds. Expired rows stay until
/// `clear_expired` runs but are never returned by `get`.
#[derive(Debug, Clone)]
pub struct SqliteCacheStore {
    pool: SqlitePool,
}

impl SqliteCacheStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn now_millis() -> i64 {
        Utc::now().timestamp_millis()
    }

    fn expiry_millis(ttl_minutes: i64) -> i64 {
        Self::now_millis().saturating_add(ttl_minutes.saturating_mul(60_000))
    }

    async fn try_get(&self, key: &str) -> Result<Option<String>, DomainError> {
        sqlx::query_scalar(
            "SELECT data FROM api_cache \
             WHERE cache_key = ? AND (expires_at IS NULL OR expires_at > ?)",
        )
        .bind(key)
        .bind(Self::now_millis())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to read cache entry: {}", e)))
    }
}

#[async_trait]
impl CacheStore for SqliteCacheStore {
    async fn get(&self, key: &str) -> Option<String> {
        match self.try_get(key).await {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!(key, error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }

    async fn set(&self, key: &str, payload: &str, ttl_minutes: i64) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO api_cache (cache_key, data, created_at, expires_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(cache_key) DO UPDATE SET
                data = excluded.data,
                created_at = excluded.created_at,
                expires_at = excluded.expires_at
            "#,
        )
        .bind(key)
        .bind(payload)
        .bind(Self::now_millis())
        .bind(Self::expiry_millis(ttl_minutes))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to write cache entry: {}", e)))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM api_cache WHERE cache_key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete cache entry: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear_expired(&self) -> Result<u64, DomainError> {
        let result =
            sqlx::query("DELETE FROM api_cache WHERE expires_at IS NOT NULL AND expires_at <= ?")
                .bind(Self::now_millis())
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::storage(format!("Failed to clear expired cache entries: {}", e))
                })?;

        Ok(result.rows_affected())
    }

    async fn clear_all(&self) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM api_cache")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to clear cache: {}", e)))?;

        Ok(())
    }
}
