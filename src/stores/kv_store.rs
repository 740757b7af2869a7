//! Key-value store client shared by the pipeline and the read API

use async_trait::async_trait;
use serde::Serialize;

use crate::error::StoreError;

/// Catalog key: JSON array of catalog entries
pub const CATALOG_KEY: &str = "music-graph";

/// Report key: JSON diagnostics object
pub const REPORT_KEY: &str = "admin-report";

/// Minimal key-value namespace; each `put` fully replaces the prior value
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Serialize `value` and store it under `key`
pub async fn put_json<T>(store: &dyn KvStore, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + Sync + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.put(key, &json).await
}
