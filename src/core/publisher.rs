//! Catalog publisher
//!
//! The catalog and the report live under independent keys. The catalog is
//! written first; the report is always attempted afterwards so it can
//! describe what happened to the catalog write.

use crate::models::{CatalogEntry, DiagnosticsReport};
use crate::stores::{put_json, KvStore, CATALOG_KEY, REPORT_KEY};

pub const STORAGE_OK: &str = "ok";
pub const STORAGE_SKIPPED: &str = "skipped: no entries produced, previous catalog retained";

/// Write the catalog (unless empty) and then the report
///
/// Returns the report as written, with `storage_status` filled in.
pub async fn publish(
    store: &dyn KvStore,
    entries: &[CatalogEntry],
    mut report: DiagnosticsReport,
) -> DiagnosticsReport {
    report.storage_status = if entries.is_empty() {
        tracing::warn!("No entries produced; keeping the previously published catalog");
        STORAGE_SKIPPED.to_string()
    } else {
        match put_json(store, CATALOG_KEY, entries).await {
            Ok(()) => {
                tracing::info!("Published {} catalog entries", entries.len());
                STORAGE_OK.to_string()
            }
            Err(e) => {
                tracing::error!("Catalog write failed: {}", e);
                format!("failed: {}", e)
            }
        }
    };

    if let Err(e) = put_json(store, REPORT_KEY, &report).await {
        tracing::error!("Report write failed: {}", e);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::enricher::{enrich, RunContext};
    use crate::models::{Candidate, CandidateOrigin};
    use crate::stores::MemoryStore;
    use chrono::Utc;

    fn entries(n: usize) -> Vec<CatalogEntry> {
        let candidates: Vec<Candidate> = (0..n)
            .map(|i| Candidate {
                title: format!("T{}", i),
                artist: String::from("A"),
                language: String::from("English"),
                genre: String::from("Pop"),
                origin: CandidateOrigin::Seed,
            })
            .collect();
        enrich(&candidates, &RunContext::new()).entries
    }

    fn report() -> DiagnosticsReport {
        DiagnosticsReport::new("run", "v", Utc::now())
    }

    #[tokio::test]
    async fn test_publish_writes_both_keys() {
        let store = MemoryStore::new();
        let published = publish(&store, &entries(3), report()).await;

        assert_eq!(published.storage_status, STORAGE_OK);
        let catalog: Vec<CatalogEntry> =
            serde_json::from_str(&store.get(CATALOG_KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(catalog.len(), 3);

        let stored: DiagnosticsReport =
            serde_json::from_str(&store.get(REPORT_KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(stored.storage_status, STORAGE_OK);
    }

    #[tokio::test]
    async fn test_empty_catalog_is_not_written() {
        let store = MemoryStore::new();
        store.put(CATALOG_KEY, "[\"previous\"]").await.unwrap();

        let published = publish(&store, &[], report()).await;

        assert_eq!(published.storage_status, STORAGE_SKIPPED);
        assert_eq!(
            store.get(CATALOG_KEY).await.unwrap().as_deref(),
            Some("[\"previous\"]")
        );
        assert!(store.get(REPORT_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_catalog_failure_still_writes_report() {
        let store = MemoryStore::new();
        store.reject_key(CATALOG_KEY);

        let published = publish(&store, &entries(2), report()).await;

        assert!(published.storage_status.starts_with("failed: "));
        assert!(store.get(CATALOG_KEY).await.unwrap().is_none());

        let stored: DiagnosticsReport =
            serde_json::from_str(&store.get(REPORT_KEY).await.unwrap().unwrap()).unwrap();
        assert!(stored.storage_status.starts_with("failed: "));
    }

    #[tokio::test]
    async fn test_total_store_outage_does_not_panic() {
        let store = MemoryStore::new();
        store.reject_writes(true);

        let published = publish(&store, &entries(1), report()).await;
        assert!(published.storage_status.starts_with("failed: "));
        assert!(store.get(REPORT_KEY).await.unwrap().is_none());
    }
}
