//! Candidate enrichment
//!
//! Assigns ids, grouping labels, popularity bands, placeholder snippets and
//! artwork URLs. Every derivation is deterministic given the candidate and
//! its position, except the id which is scoped to one run.
//!
//! Enrichment cannot fail: a field whose derivation errors gets its
//! fallback value and the entry is counted in [`Enrichment::fallbacks`].

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::error::EnrichError;
use crate::models::{Candidate, CatalogEntry, DEFAULT_LANGUAGE};
use crate::utils::hashing::hash_index;

/// Placeholder release year stamped on every entry
pub const CATALOG_YEAR: i32 = 2026;

/// Highest popularity value; position 0 gets this
pub const POPULARITY_CEILING: u32 = 100;

/// Popularity wraps back to the ceiling every this many entries
pub const POPULARITY_BAND: usize = 50;

/// Album label for default-language entries
pub const DEFAULT_ALBUM: &str = "Global Archive";

pub const FALLBACK_SNIPPET: &str = "Lyrics discovered. Snippet indexing delayed.";
pub const FALLBACK_IMAGE: &str = "https://picsum.photos/seed/lyriverse/600/600";

const IMAGE_BASE: &str = "https://picsum.photos/seed";

/// Placeholder lines; not lyric content
const SNIPPET_POOL: &[&str] = &[
    "A late-night anthem about chasing the city lights until sunrise.",
    "A slow-burning confession whispered over a heartbeat rhythm.",
    "An open-road chorus built for windows down and volume up.",
    "A bittersweet letter to a summer that ended too soon.",
    "A dancefloor promise that the weekend never has to end.",
    "A quiet ballad about finding home in someone else.",
    "A defiant hook for anyone who was ever told to stay small.",
    "A dreamy refrain drifting somewhere between memory and longing.",
];

/// Per-run identity shared by every entry produced in that run
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
}

impl RunContext {
    pub fn new() -> Self {
        let started_at = Utc::now();
        let nonce = Uuid::new_v4().simple().to_string();
        Self {
            run_id: format!("{}-{}", started_at.timestamp_millis(), &nonce[..8]),
            started_at,
        }
    }

    /// RFC 3339 run timestamp stamped on each entry
    pub fn source_timestamp(&self) -> String {
        self.started_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Enricher output
#[derive(Debug, Clone)]
pub struct Enrichment {
    pub entries: Vec<CatalogEntry>,
    /// Entries where at least one field used its fallback
    pub fallbacks: usize,
}

/// Enrich merged candidates in order
pub fn enrich(candidates: &[Candidate], ctx: &RunContext) -> Enrichment {
    let source_timestamp = ctx.source_timestamp();
    let mut fallbacks = 0;

    let entries = candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let (snippet, image, degraded) = presentation(candidate);
            if degraded {
                fallbacks += 1;
            }

            CatalogEntry {
                id: format!("song-{}-{}", ctx.run_id, i),
                title: candidate.title.clone(),
                artist: candidate.artist.clone(),
                album: album_for(&candidate.language),
                year: CATALOG_YEAR,
                language: candidate.language.clone(),
                genre: candidate.genre.clone(),
                popularity: popularity(i),
                snippet,
                image,
                source_timestamp: source_timestamp.clone(),
            }
        })
        .collect();

    Enrichment { entries, fallbacks }
}

/// Snippet and image with fallbacks applied; the flag is set if either fell back
fn presentation(candidate: &Candidate) -> (String, String, bool) {
    let mut degraded = false;

    let snippet = match derive_snippet(&candidate.title) {
        Ok(s) => s.to_string(),
        Err(e) => {
            tracing::warn!("Snippet fallback for '{}': {}", candidate.title, e);
            degraded = true;
            FALLBACK_SNIPPET.to_string()
        }
    };

    let image = match derive_image(&candidate.title, &candidate.artist) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Image fallback for '{}': {}", candidate.title, e);
            degraded = true;
            FALLBACK_IMAGE.to_string()
        }
    };

    (snippet, image, degraded)
}

/// `100 - (i mod 50)`, never below 1
pub fn popularity(index: usize) -> u32 {
    let offset = (index % POPULARITY_BAND) as u32;
    POPULARITY_CEILING.saturating_sub(offset).max(1)
}

/// Grouping label: "Global Archive" or "<language> Essentials"
pub fn album_for(language: &str) -> String {
    if language == DEFAULT_LANGUAGE {
        DEFAULT_ALBUM.to_string()
    } else {
        format!("{} Essentials", language)
    }
}

/// Stable pool pick keyed on the title hash
pub fn derive_snippet(title: &str) -> Result<&'static str, EnrichError> {
    if title.trim().is_empty() {
        return Err(EnrichError::BlankTitle);
    }
    Ok(SNIPPET_POOL[hash_index(title, SNIPPET_POOL.len())])
}

/// Placeholder artwork seeded by "title-artist"
pub fn derive_image(title: &str, artist: &str) -> Result<String, EnrichError> {
    let title = title.trim();
    let artist = artist.trim();
    if title.is_empty() && artist.is_empty() {
        return Err(EnrichError::BlankSeed);
    }

    let seed = format!("{}-{}", title, artist);
    Ok(format!(
        "{}/{}/600/600",
        IMAGE_BASE,
        urlencoding::encode(&seed)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CandidateOrigin;
    use std::collections::HashSet;

    fn candidate(title: &str, artist: &str, language: &str) -> Candidate {
        Candidate {
            title: title.to_string(),
            artist: artist.to_string(),
            language: language.to_string(),
            genre: String::from("Pop"),
            origin: CandidateOrigin::Seed,
        }
    }

    fn numbered(n: usize) -> Vec<Candidate> {
        (0..n)
            .map(|i| candidate(&format!("Song {}", i), &format!("Artist {}", i), "English"))
            .collect()
    }

    #[test]
    fn test_popularity_wraps_at_band() {
        let out = enrich(&numbered(60), &RunContext::new());
        assert_eq!(out.entries[0].popularity, 100);
        assert_eq!(out.entries[49].popularity, 51);
        assert_eq!(out.entries[50].popularity, 100);
        assert_eq!(out.entries[59].popularity, 91);
    }

    #[test]
    fn test_popularity_bounds() {
        for i in 0..500 {
            let p = popularity(i);
            assert!((1..=100).contains(&p), "index {} gave {}", i, p);
        }
    }

    #[test]
    fn test_ids_unique_within_run() {
        let ctx = RunContext::new();
        let out = enrich(&numbered(120), &ctx);
        let ids: HashSet<&str> = out.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), 120);
        assert!(out.entries[7].id.starts_with("song-"));
        assert!(out.entries[7].id.ends_with("-7"));
        assert!(out.entries[7].id.contains(&ctx.run_id));
    }

    #[test]
    fn test_album_grouping() {
        assert_eq!(album_for("English"), "Global Archive");
        assert_eq!(album_for("Korean"), "Korean Essentials");
    }

    #[test]
    fn test_snippet_and_image_stable_across_runs() {
        let items = vec![candidate("Lemon", "Kenshi Yonezu", "Japanese")];
        let first = enrich(&items, &RunContext::new());
        let second = enrich(&items, &RunContext::new());

        assert_eq!(first.entries[0].snippet, second.entries[0].snippet);
        assert_eq!(first.entries[0].image, second.entries[0].image);
        assert_eq!(
            first.entries[0].image,
            "https://picsum.photos/seed/Lemon-Kenshi%20Yonezu/600/600"
        );
    }

    #[test]
    fn test_snippet_comes_from_pool() {
        let s = derive_snippet("Despacito").unwrap();
        assert!(SNIPPET_POOL.contains(&s));
        assert_eq!(s, derive_snippet("Despacito").unwrap());
    }

    #[test]
    fn test_fallbacks_never_leave_blanks() {
        let items = vec![
            candidate("   ", "", "English"),
            candidate(" ", "Artist Only", "English"),
            candidate("Fine", "Artist", "English"),
        ];
        let out = enrich(&items, &RunContext::new());

        assert_eq!(out.entries.len(), 3);
        assert_eq!(out.entries[0].snippet, FALLBACK_SNIPPET);
        assert_eq!(out.entries[0].image, FALLBACK_IMAGE);
        // image can still be seeded from the artist alone
        assert_eq!(out.entries[1].snippet, FALLBACK_SNIPPET);
        assert_ne!(out.entries[1].image, FALLBACK_IMAGE);
        assert_eq!(out.fallbacks, 2);

        for entry in &out.entries {
            assert!(!entry.snippet.is_empty());
            assert!(!entry.image.is_empty());
        }
    }

    #[test]
    fn test_fixed_fields() {
        let ctx = RunContext::new();
        let out = enrich(&[candidate("Pepas", "Farruko", "Spanish")], &ctx);
        let entry = &out.entries[0];
        assert_eq!(entry.year, CATALOG_YEAR);
        assert_eq!(entry.album, "Spanish Essentials");
        assert_eq!(entry.language, "Spanish");
        assert_eq!(entry.source_timestamp, ctx.source_timestamp());
    }
}
