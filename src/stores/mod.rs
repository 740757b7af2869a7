//! Key-value store clients for the published catalog and report

mod kv_store;
mod memory_store;
mod sqlite_store;

pub use kv_store::{put_json, KvStore, CATALOG_KEY, REPORT_KEY};
pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;
