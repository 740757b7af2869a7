//! Error types for the discovery pipeline
//!
//! None of these escape `Pipeline::run`; each one is folded into the
//! diagnostics report as a status string.

use thiserror::Error;

/// Why the live chart could not contribute entries to a run
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("network error: {0}")]
    Network(String),

    #[error("upstream returned HTTP {0}")]
    HttpStatus(u16),

    #[error("blocked: {0}")]
    Blocked(String),

    #[error("body too short ({0} bytes)")]
    BodyTooShort(usize),

    #[error("pattern mismatch")]
    PatternMismatch,
}

impl From<reqwest::Error> for ScrapeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScrapeError::Network(format!("timed out: {}", err))
        } else {
            ScrapeError::Network(err.to_string())
        }
    }
}

/// Shared store failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("store rejected write to '{0}'")]
    Rejected(String),
}

/// A single field derivation that could not be completed for one candidate
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("title is blank")]
    BlankTitle,

    #[error("image seed is blank")]
    BlankSeed,
}
