//! Runtime settings
//!
//! Every field has a serde default, so an absent settings file and an empty
//! environment still produce a usable configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{DEFAULT_CHART_URL, ENV_PREFIX, MAX_CHART_ENTRIES};

/// Settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Chart page fetched on every run
    #[serde(default = "default_chart_url")]
    pub chart_url: String,

    /// User agent sent to the chart host
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Upper bound on the chart fetch
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Bodies shorter than this are treated as a blocked response
    #[serde(default = "default_min_body_len")]
    pub min_body_len: usize,

    /// Maximum number of chart rows kept per run
    #[serde(default = "default_max_chart_entries")]
    pub max_chart_entries: usize,

    /// SQLite file backing the key-value store
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Run the pipeline on a timer
    #[serde(default = "default_true")]
    pub enable_periodic_index: bool,

    /// Hours between timer-driven runs
    #[serde(default = "default_index_interval_hours")]
    pub index_interval_hours: u64,

    /// Bearer token required by the manual trigger, if set
    #[serde(default)]
    pub admin_token: Option<String>,

    /// JSON file replacing the built-in seed catalog
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chart_url: default_chart_url(),
            user_agent: default_user_agent(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            min_body_len: default_min_body_len(),
            max_chart_entries: default_max_chart_entries(),
            database_path: default_database_path(),
            enable_periodic_index: true,
            index_interval_hours: default_index_interval_hours(),
            admin_token: None,
            seed_path: None,
        }
    }
}

impl Settings {
    /// Load settings from `path` (if it exists) and the environment
    pub fn load(path: &Path) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read settings from {}", path.display()))?
            .try_deserialize::<Settings>()
            .context("Failed to parse settings")?;

        Ok(settings.normalized())
    }

    /// Clamp values that would otherwise stall or disable a run
    fn normalized(mut self) -> Self {
        if self.fetch_timeout_secs == 0 {
            self.fetch_timeout_secs = default_fetch_timeout_secs();
        }
        if self.max_chart_entries == 0 {
            self.max_chart_entries = default_max_chart_entries();
        }
        self.max_chart_entries = self.max_chart_entries.min(MAX_CHART_ENTRIES);
        if self.index_interval_hours == 0 {
            self.index_interval_hours = default_index_interval_hours();
        }
        // an empty token in the environment means "no gate"
        if self
            .admin_token
            .as_deref()
            .map(|t| t.trim().is_empty())
            .unwrap_or(false)
        {
            self.admin_token = None;
        }
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn index_interval(&self) -> Duration {
        Duration::from_secs(self.index_interval_hours * 3600)
    }
}

// Default value functions for serde

fn default_true() -> bool {
    true
}

fn default_chart_url() -> String {
    DEFAULT_CHART_URL.to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    5
}

fn default_min_body_len() -> usize {
    1024
}

fn default_max_chart_entries() -> usize {
    MAX_CHART_ENTRIES
}

fn default_database_path() -> PathBuf {
    PathBuf::from("lyriverse.db")
}

fn default_index_interval_hours() -> u64 {
    6
}
