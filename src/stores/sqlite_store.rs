//! SQLite-backed store

use async_trait::async_trait;

use super::KvStore;
use crate::db::{DbEngine, KvTable};
use crate::error::StoreError;

/// Persistent store over the `kv` table
#[derive(Clone)]
pub struct SqliteStore {
    engine: DbEngine,
}

impl SqliteStore {
    pub fn new(engine: DbEngine) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl KvStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(KvTable::find(self.engine.pool(), key).await?)
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        KvTable::upsert(self.engine.pool(), key, value).await?;
        Ok(())
    }
}
