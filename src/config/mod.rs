//! Configuration module for Lyriverse
//!
//! Settings come from an optional settings file layered under
//! `LYRIVERSE_*` environment variables.

mod settings;

pub use settings::Settings;

/// Upstream singles chart scraped on every run
pub const DEFAULT_CHART_URL: &str = "https://www.officialcharts.com/charts/singles-chart/";

/// Settings file looked up in the working directory when `--config` is absent
pub const DEFAULT_SETTINGS_FILE: &str = "lyriverse.toml";

/// Environment variable prefix for settings overrides
pub const ENV_PREFIX: &str = "LYRIVERSE";

/// Upper bound on chart rows taken from one page
pub const MAX_CHART_ENTRIES: usize = 50;
