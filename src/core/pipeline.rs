//! Discovery pipeline: fetch -> extract -> merge -> enrich -> publish
//!
//! A run never fails as a whole. Scrape problems degrade to a seed-only
//! catalog, enrichment problems degrade to fallback fields, and store
//! problems end up in the report. Concurrent runs are not serialized; the
//! store keeps whichever run wrote last.

use chrono::Utc;
use std::fmt;
use std::sync::Arc;

use super::enricher::{enrich, RunContext};
use super::extractor::{ChartExtractor, FallbackExtractor};
use super::fetcher::{ChartSource, HttpChartSource};
use super::merger::merge;
use super::publisher::publish;
use super::seed::SeedCatalog;
use crate::config::Settings;
use crate::error::ScrapeError;
use crate::models::{CandidateOrigin, ChartEntry, DiagnosticsReport};
use crate::stores::KvStore;

/// Run state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Idle,
    Fetching,
    Extracting,
    Merging,
    Enriching,
    Publishing,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunStage::Idle => "idle",
            RunStage::Fetching => "fetching",
            RunStage::Extracting => "extracting",
            RunStage::Merging => "merging",
            RunStage::Enriching => "enriching",
            RunStage::Publishing => "publishing",
        };
        f.write_str(name)
    }
}

/// Report plus the stages one run passed through
#[derive(Debug, Clone)]
pub struct RunTrace {
    pub report: DiagnosticsReport,
    pub stages: Vec<RunStage>,
}

/// Everything one run needs; cheap to clone into a spawned task
#[derive(Clone)]
pub struct Pipeline {
    source: Arc<dyn ChartSource>,
    extractor: Arc<dyn ChartExtractor>,
    seed: Arc<SeedCatalog>,
    store: Arc<dyn KvStore>,
}

impl Pipeline {
    pub fn new(
        source: Arc<dyn ChartSource>,
        extractor: Arc<dyn ChartExtractor>,
        seed: SeedCatalog,
        store: Arc<dyn KvStore>,
    ) -> Self {
        Self {
            source,
            extractor,
            seed: Arc::new(seed),
            store,
        }
    }

    /// HTTP chart source, standard extraction chain, configured seed
    pub fn from_settings(settings: &Settings, store: Arc<dyn KvStore>) -> Self {
        Self::new(
            Arc::new(HttpChartSource::from_settings(settings)),
            Arc::new(FallbackExtractor::standard(settings.max_chart_entries)),
            SeedCatalog::resolve(settings.seed_path.as_deref()),
            store,
        )
    }

    pub fn store(&self) -> Arc<dyn KvStore> {
        Arc::clone(&self.store)
    }

    /// Execute one full run and return the published report
    pub async fn run(&self) -> DiagnosticsReport {
        self.run_traced().await.report
    }

    /// Like [`Pipeline::run`], also returning the stages traversed
    pub async fn run_traced(&self) -> RunTrace {
        let ctx = RunContext::new();
        let mut report = DiagnosticsReport::new(&ctx.run_id, &self.seed.version, ctx.started_at);
        let mut stages = vec![RunStage::Idle];

        tracing::info!(
            "Discovery run {} starting ({} seed entries, seed {})",
            ctx.run_id,
            self.seed.len(),
            self.seed.version
        );

        let chart = match self.scrape(&ctx, &mut stages).await {
            Ok(entries) => {
                tracing::info!("Identified {} trending tracks", entries.len());
                report.scrape_status = format!("ok: found {} entries", entries.len());
                entries
            }
            Err(e) => {
                tracing::warn!("Chart scrape failed ({}); continuing with seed catalog only", e);
                report.scrape_status = format!("failed: {}", e);
                Vec::new()
            }
        };
        report.scanned = chart.len();

        enter(&ctx, &mut stages, RunStage::Merging);
        let candidates = merge(&chart, &self.seed.entries);
        report.seeded = candidates
            .iter()
            .filter(|c| c.origin == CandidateOrigin::Seed)
            .count();

        enter(&ctx, &mut stages, RunStage::Enriching);
        let enrichment = enrich(&candidates, &ctx);
        report.total_indexed = enrichment.entries.len();
        report.enrichment_fallbacks = enrichment.fallbacks;
        report.record_languages(&enrichment.entries);

        enter(&ctx, &mut stages, RunStage::Publishing);
        report.finish(Utc::now());
        let report = publish(self.store.as_ref(), &enrichment.entries, report).await;

        enter(&ctx, &mut stages, RunStage::Idle);
        tracing::info!(
            "Discovery run {} finished in {:.2}s: {} indexed ({} chart, {} seed), scrape {}, storage {}",
            report.run_id,
            report.duration_seconds,
            report.total_indexed,
            report.total_indexed.saturating_sub(report.seeded),
            report.seeded,
            report.scrape_status,
            report.storage_status
        );

        RunTrace { report, stages }
    }

    /// Fetch and extract; an empty extraction counts as a pattern mismatch
    async fn scrape(
        &self,
        ctx: &RunContext,
        stages: &mut Vec<RunStage>,
    ) -> Result<Vec<ChartEntry>, ScrapeError> {
        enter(ctx, stages, RunStage::Fetching);
        let raw = self.source.fetch_chart_page().await?;

        enter(ctx, stages, RunStage::Extracting);
        let entries = self.extractor.extract(&raw);
        if entries.is_empty() {
            return Err(ScrapeError::PatternMismatch);
        }

        Ok(entries)
    }
}

fn enter(ctx: &RunContext, stages: &mut Vec<RunStage>, next: RunStage) {
    if let Some(prev) = stages.last() {
        tracing::debug!("run {}: {} -> {}", ctx.run_id, prev, next);
    }
    stages.push(next);
}
