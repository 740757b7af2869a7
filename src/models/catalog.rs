//! Published catalog entry

use serde::{Deserialize, Serialize};

/// A song as served by `GET /api/songs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique within one published catalog
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Grouping label derived from the language
    pub album: String,
    pub year: i32,
    pub language: String,
    pub genre: String,
    /// 1..=100, higher is more prominent
    pub popularity: u32,
    /// Never empty
    pub snippet: String,
    /// Never empty
    pub image: String,
    /// RFC 3339 timestamp of the run that produced this entry
    pub source_timestamp: String,
}
