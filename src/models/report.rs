//! Diagnostics report published next to the catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CatalogEntry;

/// Summary of the most recent run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    /// Chart entries extracted this run
    pub scanned: usize,
    /// Merged candidates contributed by the seed catalog
    pub seeded: usize,
    /// Entries in the catalog produced this run
    pub total_indexed: usize,
    pub scrape_status: String,
    pub storage_status: String,
    /// Distinct languages of the produced catalog, first-seen order
    pub languages: Vec<String>,
    /// Finish time
    pub timestamp: DateTime<Utc>,

    pub run_id: String,
    pub seed_version: String,
    /// Entries where at least one field fell back to its placeholder
    pub enrichment_fallbacks: usize,
    pub started_at: DateTime<Utc>,
    pub duration_seconds: f64,
}

impl DiagnosticsReport {
    /// Fresh report for a run that has not published yet
    pub fn new(run_id: &str, seed_version: &str, started_at: DateTime<Utc>) -> Self {
        Self {
            scanned: 0,
            seeded: 0,
            total_indexed: 0,
            scrape_status: String::from("pending"),
            storage_status: String::from("pending"),
            languages: Vec::new(),
            timestamp: started_at,
            run_id: run_id.to_string(),
            seed_version: seed_version.to_string(),
            enrichment_fallbacks: 0,
            started_at,
            duration_seconds: 0.0,
        }
    }

    /// Collect distinct languages in first-seen order
    pub fn record_languages(&mut self, entries: &[CatalogEntry]) {
        self.languages.clear();
        for entry in entries {
            if !self.languages.contains(&entry.language) {
                self.languages.push(entry.language.clone());
            }
        }
    }

    /// Stamp the finish time and duration
    pub fn finish(&mut self, now: DateTime<Utc>) {
        self.timestamp = now;
        self.duration_seconds = (now - self.started_at).num_milliseconds().max(0) as f64 / 1000.0;
    }

    pub fn scrape_failed(&self) -> bool {
        self.scrape_status.starts_with("failed")
    }

    pub fn storage_ok(&self) -> bool {
        self.storage_status == "ok"
    }
}
