//! Built-in multilingual seed catalog
//!
//! Curated entries that keep the catalog populated (and multilingual) when
//! the live chart is unavailable. Bump [`SEED_CATALOG_VERSION`] whenever the
//! list changes.

use anyhow::{Context, Result};
use std::path::Path;

use crate::models::SeedEntry;

pub const SEED_CATALOG_VERSION: &str = "2026.2";

/// (title, artist, language, genre)
const SEED_CATALOG: &[(&str, &str, &str, &str)] = &[
    ("Bohemian Rhapsody", "Queen", "English", "Rock"),
    ("Shape of You", "Ed Sheeran", "English", "Pop"),
    ("Calm Down", "Rema", "English", "Afrobeats"),
    ("Despacito", "Luis Fonsi", "Spanish", "Latin Pop"),
    ("Tití Me Preguntó", "Bad Bunny", "Spanish", "Reggaeton"),
    ("Bésame Mucho", "Consuelo Velázquez", "Spanish", "Bolero"),
    ("Gangnam Style", "PSY", "Korean", "K-Pop"),
    ("Pink Venom", "BLACKPINK", "Korean", "K-Pop"),
    ("Spring Day", "BTS", "Korean", "K-Pop"),
    ("Tum Hi Ho", "Arijit Singh", "Hindi", "Bollywood"),
    ("Kesariya", "Arijit Singh", "Hindi", "Bollywood"),
    ("Lemon", "Kenshi Yonezu", "Japanese", "J-Pop"),
    ("Idol", "YOASOBI", "Japanese", "J-Pop"),
    ("La Vie en rose", "Édith Piaf", "French", "Chanson"),
    ("Alors on danse", "Stromae", "French", "Electronic"),
    ("Garota de Ipanema", "Tom Jobim", "Portuguese", "Bossa Nova"),
    ("Ai Se Eu Te Pego", "Michel Teló", "Portuguese", "Sertanejo"),
    ("99 Luftballons", "Nena", "German", "New Wave"),
    ("Nel blu dipinto di blu", "Domenico Modugno", "Italian", "Canzone"),
    ("Pepas", "Farruko", "Spanish", "Reggaeton"),
];

/// Seed entries plus the version string published in the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedCatalog {
    pub version: String,
    pub entries: Vec<SeedEntry>,
}

impl SeedCatalog {
    pub fn new(version: &str, entries: Vec<SeedEntry>) -> Self {
        Self {
            version: version.to_string(),
            entries,
        }
    }

    /// The built-in catalog, in curated order
    pub fn builtin() -> Self {
        let entries = SEED_CATALOG
            .iter()
            .map(|(title, artist, language, genre)| SeedEntry::new(title, artist, language, genre))
            .collect();
        Self::new(SEED_CATALOG_VERSION, entries)
    }

    /// Read a seed override file (JSON array of seed entries)
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        let entries: Vec<SeedEntry> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse seed file {}", path.display()))?;

        let version = match path.file_name() {
            Some(name) => format!("file:{}", name.to_string_lossy()),
            None => String::from("file"),
        };
        Ok(Self::new(&version, entries))
    }

    /// Override file when configured and readable, built-in catalog otherwise
    pub fn resolve(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };

        match Self::from_file(path) {
            Ok(catalog) if !catalog.entries.is_empty() => {
                tracing::info!(
                    "Loaded {} seed entries from {}",
                    catalog.entries.len(),
                    path.display()
                );
                catalog
            }
            Ok(_) => {
                tracing::warn!("Seed file {} is empty; using built-in catalog", path.display());
                Self::builtin()
            }
            Err(e) => {
                tracing::warn!("{:#}; using built-in catalog", e);
                Self::builtin()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Candidate;
    use std::collections::HashSet;

    #[test]
    fn test_seed_keys_are_distinct() {
        let seed = SeedCatalog::builtin();
        let keys: HashSet<String> = seed
            .entries
            .iter()
            .map(|s| Candidate::dedup_key(&s.title, &s.artist))
            .collect();
        assert_eq!(keys.len(), seed.len());
        assert_eq!(seed.version, SEED_CATALOG_VERSION);
    }

    #[test]
    fn test_seed_is_multilingual_and_complete() {
        let seed = SeedCatalog::builtin();
        let languages: HashSet<&str> = seed.entries.iter().map(|s| s.language.as_str()).collect();
        assert!(languages.len() >= 6);
        assert!(seed
            .entries
            .iter()
            .all(|s| !s.title.is_empty() && !s.artist.is_empty() && !s.genre.is_empty()));
    }

    #[test]
    fn test_resolve_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert_eq!(SeedCatalog::resolve(Some(missing.as_path())), SeedCatalog::builtin());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert_eq!(SeedCatalog::resolve(Some(broken.as_path())), SeedCatalog::builtin());

        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, "[]").unwrap();
        assert_eq!(SeedCatalog::resolve(Some(empty.as_path())), SeedCatalog::builtin());

        assert_eq!(SeedCatalog::resolve(None), SeedCatalog::builtin());
    }

    #[test]
    fn test_resolve_reads_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(
            &path,
            r#"[{"title":"Volare","artist":"Gipsy Kings","language":"Italian","genre":"Rumba"}]"#,
        )
        .unwrap();

        let seed = SeedCatalog::resolve(Some(path.as_path()));
        assert_eq!(seed.version, "file:seed.json");
        assert_eq!(
            seed.entries,
            vec![SeedEntry::new("Volare", "Gipsy Kings", "Italian", "Rumba")]
        );
    }
}
