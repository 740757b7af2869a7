//! Discovery pipeline stages
//!
//! Fetcher -> Extractor -> Merger (with Seed Catalog) -> Enricher -> Publisher

pub mod crons;
pub mod enricher;
pub mod extractor;
pub mod fetcher;
pub mod merger;
pub mod pipeline;
pub mod publisher;
pub mod seed;

pub use pipeline::Pipeline;
