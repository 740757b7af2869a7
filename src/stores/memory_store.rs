//! In-memory store

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use super::KvStore;
use crate::error::StoreError;

/// Process-local store; used by `--once` dry runs and tests
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
    rejected_keys: RwLock<Vec<String>>,
    reject_all: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail
    #[cfg(test)]
    pub fn reject_writes(&self, reject: bool) {
        self.reject_all.store(reject, Ordering::SeqCst);
    }

    /// Make writes to one key fail
    #[cfg(test)]
    pub fn reject_key(&self, key: &str) {
        self.rejected_keys.write().push(key.to_string());
    }

    fn rejects(&self, key: &str) -> bool {
        self.reject_all.load(Ordering::SeqCst) || self.rejected_keys.read().iter().any(|k| k == key)
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.read().get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.rejects(key) {
            return Err(StoreError::Rejected(key.to_string()));
        }
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
