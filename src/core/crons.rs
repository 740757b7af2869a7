//! Cron jobs for periodic tasks

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time;

use super::pipeline::Pipeline;

/// Start the periodic discovery job
///
/// The first tick fires immediately, so the catalog is rebuilt once at
/// startup and then every `every`.
pub fn start_cron_jobs(pipeline: Pipeline, every: Duration) -> JoinHandle<()> {
    tracing::info!(
        "Periodic discovery every {} minutes",
        every.as_secs() / 60
    );

    tokio::spawn(async move {
        let mut interval = time::interval(every);
        // a run that overshoots the period should not trigger a burst of catch-up runs
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            periodic_discovery(&pipeline).await;
        }
    })
}

async fn periodic_discovery(pipeline: &Pipeline) {
    tracing::info!("Starting periodic discovery...");
    let report = pipeline.run().await;
    tracing::info!(
        "Periodic discovery completed: {} entries indexed",
        report.total_indexed
    );
}
