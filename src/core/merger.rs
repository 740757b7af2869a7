//! Chart + seed merge with deduplication

use std::collections::HashSet;

use crate::models::{Candidate, ChartEntry, SeedEntry};

/// Chart entries first, then seed entries; the first occurrence of each
/// dedup key wins and relative order is preserved.
pub fn merge(chart: &[ChartEntry], seed: &[SeedEntry]) -> Vec<Candidate> {
    let combined = chart
        .iter()
        .map(Candidate::from)
        .chain(seed.iter().filter_map(Candidate::from_seed));

    let mut seen = HashSet::new();
    combined.filter(|c| seen.insert(c.key())).collect()
}
