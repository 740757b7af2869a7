//! Lyriverse - trending-song discovery engine
//!
//! Scrapes the singles chart, merges it with a curated multilingual seed
//! catalog, enriches the result and publishes it for the read API.

mod api;
mod config;
mod core;
mod db;
mod error;
mod models;
mod stores;
mod utils;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::core::Pipeline;
use crate::db::DbEngine;
use crate::stores::{KvStore, MemoryStore, SqliteStore};

/// Lyriverse discovery engine
#[derive(Parser, Debug)]
#[command(name = "lyriverse")]
#[command(version)]
#[command(about = "Trending-song discovery engine and catalog API")]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8787)]
    port: u16,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Path to settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run one discovery pass, print the report and exit
    #[arg(long)]
    once: bool,

    /// With --once, publish to a throwaway in-memory store
    #[arg(long, requires = "once")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };

    // keep dependency chatter out of the run log
    let filter = tracing_subscriber::EnvFilter::new(format!(
        "{},sqlx=warn,hyper=warn,reqwest=warn,html5ever=warn,selectors=warn",
        log_level
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("Lyriverse v{} starting...", env!("CARGO_PKG_VERSION"));

    let settings_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_SETTINGS_FILE));
    let settings = Settings::load(&settings_path)?;
    info!("Chart source: {}", settings.chart_url);

    let store = open_store(&settings, args.dry_run).await?;
    let pipeline = Pipeline::from_settings(&settings, store);

    if args.once {
        let report = pipeline.run().await;
        if report.scrape_failed() {
            tracing::warn!("Live chart unavailable; catalog was built from the seed only");
        }
        if !report.storage_ok() {
            tracing::warn!("Catalog not stored: {}", report.storage_status);
        }
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    serve(args.host, args.port, settings, pipeline).await
}

async fn open_store(settings: &Settings, dry_run: bool) -> Result<Arc<dyn KvStore>> {
    if dry_run {
        info!("Dry run: publishing to an in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    info!("Opening store at {}", settings.database_path.display());
    let engine = DbEngine::open(&settings.database_path).await?;
    Ok(Arc::new(SqliteStore::new(engine)))
}

async fn serve(host: String, port: u16, settings: Settings, pipeline: Pipeline) -> Result<()> {
    use actix_web::{middleware, web, App, HttpServer};

    if settings.enable_periodic_index {
        core::crons::start_cron_jobs(pipeline.clone(), settings.index_interval());
    } else {
        info!("Periodic discovery disabled; waiting for manual triggers");
    }

    if settings.admin_token.is_none() {
        tracing::warn!("No admin token configured; POST /api/index is open");
    }

    let state = web::Data::new(api::AppState::new(pipeline, settings.admin_token.clone()));

    let addr = format!("{}:{}", host, port);
    info!("Server listening on http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(api::cors_headers())
            .wrap(middleware::Logger::default())
            .configure(api::configure)
            .default_service(web::to(api::fallback))
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
