//! Chart, seed and merged candidate models

use serde::{Deserialize, Serialize};

use super::{DEFAULT_GENRE, DEFAULT_LANGUAGE};

/// A raw (title, artist) row pulled out of the chart page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEntry {
    pub title: String,
    pub artist: String,
}

impl ChartEntry {
    /// Build a trimmed entry, or `None` when either field is blank
    pub fn new(title: &str, artist: &str) -> Option<Self> {
        let title = title.trim();
        let artist = artist.trim();

        if title.is_empty() || artist.is_empty() {
            return None;
        }

        Some(Self {
            title: title.to_string(),
            artist: artist.to_string(),
        })
    }
}

/// A curated catalog entry; language and genre are always present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEntry {
    pub title: String,
    pub artist: String,
    pub language: String,
    pub genre: String,
}

impl SeedEntry {
    pub fn new(title: &str, artist: &str, language: &str, genre: &str) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
            language: language.to_string(),
            genre: genre.to_string(),
        }
    }
}

/// Where a merged candidate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOrigin {
    Chart,
    Seed,
}

/// A deduplicated entry awaiting enrichment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub artist: String,
    pub language: String,
    pub genre: String,
    pub origin: CandidateOrigin,
}

impl Candidate {
    /// Dedup key: lowercased title and artist joined by `|`
    pub fn dedup_key(title: &str, artist: &str) -> String {
        format!("{}|{}", title.to_lowercase(), artist.to_lowercase())
    }

    pub fn key(&self) -> String {
        Self::dedup_key(&self.title, &self.artist)
    }

    /// Trimmed seed candidate, or `None` when title or artist is blank
    pub fn from_seed(entry: &SeedEntry) -> Option<Self> {
        let title = entry.title.trim();
        let artist = entry.artist.trim();
        if title.is_empty() || artist.is_empty() {
            return None;
        }

        Some(Self {
            title: title.to_string(),
            artist: artist.to_string(),
            language: or_default(&entry.language, DEFAULT_LANGUAGE),
            genre: or_default(&entry.genre, DEFAULT_GENRE),
            origin: CandidateOrigin::Seed,
        })
    }
}

impl From<&ChartEntry> for Candidate {
    fn from(entry: &ChartEntry) -> Self {
        Self {
            title: entry.title.clone(),
            artist: entry.artist.clone(),
            language: DEFAULT_LANGUAGE.to_string(),
            genre: DEFAULT_GENRE.to_string(),
            origin: CandidateOrigin::Chart,
        }
    }
}

// seed files loaded from disk are not curated, so blanks still get defaults
fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
