//! Key-value table operations

use chrono::Utc;
use sqlx::SqlitePool;

/// kv table operations
pub struct KvTable;

impl KvTable {
    /// Replace the value stored under `key` in one statement
    pub async fn upsert(pool: &SqlitePool, key: &str, value: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Find the value stored under `key`
    pub async fn find(pool: &SqlitePool, key: &str) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|(v,)| v))
    }
}
