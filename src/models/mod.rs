//! Data models for Lyriverse
//!
//! Chart rows and seed entries flow in, catalog entries and a diagnostics
//! report flow out.

mod catalog;
mod chart;
mod report;

pub use catalog::CatalogEntry;
pub use chart::{Candidate, CandidateOrigin, ChartEntry, SeedEntry};
pub use report::DiagnosticsReport;

/// Language assumed for entries that carry none
pub const DEFAULT_LANGUAGE: &str = "English";

/// Genre assumed for entries that carry none
pub const DEFAULT_GENRE: &str = "Pop";
