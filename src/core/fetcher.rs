//! Chart page fetcher

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::Settings;
use crate::error::ScrapeError;

/// Lowercased phrases that mark a bot-wall or error page instead of the chart
const BLOCK_MARKERS: &[&str] = &[
    "access denied",
    "are you a robot",
    "request blocked",
    "verify you are human",
    "complete the captcha",
];

/// Bot walls are small pages; anything longer than this many times the
/// minimum body length is treated as real content and not scanned
const BLOCK_SCAN_FACTOR: usize = 8;

/// Source of raw chart markup
#[async_trait]
pub trait ChartSource: Send + Sync {
    async fn fetch_chart_page(&self) -> Result<String, ScrapeError>;
}

/// Fetches the chart page over HTTP
pub struct HttpChartSource {
    client: Client,
    url: String,
    min_body_len: usize,
}

impl HttpChartSource {
    pub fn new(url: &str, user_agent: &str, timeout: Duration, min_body_len: usize) -> Self {
        let client = match Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("Invalid chart client settings ({}); using default user agent", e);
                Client::builder()
                    .timeout(timeout)
                    .connect_timeout(timeout)
                    .build()
                    .unwrap_or_default()
            }
        };

        Self {
            client,
            url: url.to_string(),
            min_body_len,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            &settings.chart_url,
            &settings.user_agent,
            settings.fetch_timeout(),
            settings.min_body_len,
        )
    }
}

#[async_trait]
impl ChartSource for HttpChartSource {
    async fn fetch_chart_page(&self) -> Result<String, ScrapeError> {
        tracing::debug!("Fetching chart page from {}", self.url);

        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        validate_body(status, body, self.min_body_len)
    }
}

/// Reject non-2xx responses, bot walls and suspiciously short bodies
pub fn validate_body(status: u16, body: String, min_len: usize) -> Result<String, ScrapeError> {
    if !(200..300).contains(&status) {
        return Err(ScrapeError::HttpStatus(status));
    }

    if body.len() < min_len.saturating_mul(BLOCK_SCAN_FACTOR) {
        let lower = body.to_lowercase();
        if let Some(marker) = BLOCK_MARKERS.iter().find(|m| lower.contains(*m)) {
            return Err(ScrapeError::Blocked(format!("page contains \"{}\"", marker)));
        }
    }

    if body.len() < min_len {
        return Err(ScrapeError::BodyTooShort(body.len()));
    }

    Ok(body)
}
