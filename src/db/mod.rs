//! Database module for Lyriverse
//!
//! SQLite via SQLx, holding the key-value table behind `SqliteStore`.

mod engine;
mod kv_table;

pub use engine::DbEngine;
pub use kv_table::KvTable;
