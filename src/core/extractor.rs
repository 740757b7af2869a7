//! Chart extraction strategies
//!
//! Turning chart markup into (title, artist) rows is kept behind the
//! [`ChartExtractor`] trait so a layout change upstream only means adding or
//! swapping a strategy. Strategies never fail: unparsable input yields an
//! empty list and the caller decides what that means.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::models::ChartEntry;
use crate::utils::html::inner_text;

/// Parses raw chart markup into chart rows
pub trait ChartExtractor: Send + Sync {
    /// Short label used in logs
    fn name(&self) -> &'static str;

    /// Extract at most the strategy's cap of non-blank rows, in page order
    fn extract(&self, raw: &str) -> Vec<ChartEntry>;
}

static ROW_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse(".chart-item").unwrap());
static LEGACY_ROW_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".chart-results-list .chart-row").unwrap());
static NAME_SPAN_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse(".chart-name span").unwrap());
static NAME_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse(".chart-name").unwrap());
static ARTIST_SPAN_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".chart-artist span").unwrap());
static ARTIST_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse(".chart-artist").unwrap());

/// CSS-selector extraction over a parsed DOM
pub struct SelectorExtractor {
    max_entries: usize,
}

impl SelectorExtractor {
    pub fn new(max_entries: usize) -> Self {
        Self { max_entries }
    }

    /// First `span` under `span_sel`, else the whole `sel` text
    fn field(row: &ElementRef, span_sel: &Selector, sel: &Selector) -> String {
        let span_text = row
            .select(span_sel)
            .next()
            .map(|el| collapse(el.text()))
            .unwrap_or_default();

        if !span_text.is_empty() {
            return span_text;
        }

        row.select(sel)
            .next()
            .map(|el| collapse(el.text()))
            .unwrap_or_default()
    }
}

impl ChartExtractor for SelectorExtractor {
    fn name(&self) -> &'static str {
        "selector"
    }

    fn extract(&self, raw: &str) -> Vec<ChartEntry> {
        let document = Html::parse_document(raw);

        let mut rows: Vec<ElementRef> = document.select(&ROW_SEL).collect();
        if rows.is_empty() {
            rows = document.select(&LEGACY_ROW_SEL).collect();
        }

        rows.iter()
            .filter_map(|row| {
                let title = Self::field(row, &NAME_SPAN_SEL, &NAME_SEL);
                let artist = Self::field(row, &ARTIST_SPAN_SEL, &ARTIST_SEL);
                ChartEntry::new(&title, &artist)
            })
            .take(self.max_entries)
            .collect()
    }
}

fn collapse<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

static ROW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)class="[^"]*\bchart-name\b[^"]*"[^>]*>.*?<span[^>]*>(.*?)</span>.*?class="[^"]*\bchart-artist\b[^"]*"[^>]*>.*?<span[^>]*>(.*?)</span>"#,
    )
    .unwrap()
});

/// Regex extraction over the raw text; survives markup a DOM parser chokes on
pub struct PatternExtractor {
    max_entries: usize,
}

impl PatternExtractor {
    pub fn new(max_entries: usize) -> Self {
        Self { max_entries }
    }
}

impl ChartExtractor for PatternExtractor {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn extract(&self, raw: &str) -> Vec<ChartEntry> {
        ROW_RE
            .captures_iter(raw)
            .filter_map(|caps| ChartEntry::new(&inner_text(&caps[1]), &inner_text(&caps[2])))
            .take(self.max_entries)
            .collect()
    }
}

/// Tries each strategy in order and keeps the first non-empty result
pub struct FallbackExtractor {
    strategies: Vec<Box<dyn ChartExtractor>>,
}

impl FallbackExtractor {
    pub fn new(strategies: Vec<Box<dyn ChartExtractor>>) -> Self {
        Self { strategies }
    }

    /// Selector extraction first, then the regex pattern
    pub fn standard(max_entries: usize) -> Self {
        Self::new(vec![
            Box::new(SelectorExtractor::new(max_entries)),
            Box::new(PatternExtractor::new(max_entries)),
        ])
    }
}

impl ChartExtractor for FallbackExtractor {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn extract(&self, raw: &str) -> Vec<ChartEntry> {
        for strategy in &self.strategies {
            let entries = strategy.extract(raw);
            if !entries.is_empty() {
                tracing::debug!(
                    "{} strategy extracted {} chart entries",
                    strategy.name(),
                    entries.len()
                );
                return entries;
            }
            tracing::debug!("{} strategy found no chart entries", strategy.name());
        }
        Vec::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Chart page in the current `.chart-item` layout
    pub(crate) fn chart_fixture(rows: &[(&str, &str)]) -> String {
        let mut html = String::from("<html><head><title>Official Singles Chart</title></head><body><div class=\"chart\">");
        for (pos, (title, artist)) in rows.iter().enumerate() {
            html.push_str(&format!(
                r#"
                <div class="chart-item">
                  <div class="chart-item-content">
                    <span class="position">{}</span>
                    <div class="description block">
                      <a class="chart-name font-bold inline-block" href="/songs/{}/"><span>{}</span></a>
                      <a class="chart-artist text-lg inline-block" href="/artist/{}/"><span>{}</span></a>
                    </div>
                  </div>
                </div>"#,
                pos + 1,
                pos,
                title,
                pos,
                artist
            ));
        }
        html.push_str("</div></body></html>");
        html
    }

    #[test]
    fn test_selector_current_layout() {
        let html = chart_fixture(&[
            ("Espresso", "Sabrina Carpenter"),
            ("Tom &amp; Jerry", "Some Duo"),
        ]);
        let entries = SelectorExtractor::new(50).extract(&html);
        assert_eq!(
            entries,
            vec![
                ChartEntry::new("Espresso", "Sabrina Carpenter").unwrap(),
                ChartEntry::new("Tom & Jerry", "Some Duo").unwrap(),
            ]
        );
    }

    #[test]
    fn test_selector_legacy_layout_without_spans() {
        let html = r#"<html><body><table class="chart-results-list">
            <tr class="chart-row"><td><div class="chart-name">Old Song</div><div class="chart-artist">Old Band</div></td></tr>
            <tr class="chart-row"><td><div class="chart-name">  </div><div class="chart-artist">Nobody</div></td></tr>
        </table></body></html>"#;
        let entries = SelectorExtractor::new(50).extract(html);
        assert_eq!(entries, vec![ChartEntry::new("Old Song", "Old Band").unwrap()]);
    }

    #[test]
    fn test_selector_respects_cap() {
        let rows: Vec<(String, String)> = (0..60)
            .map(|i| (format!("Song {}", i), format!("Artist {}", i)))
            .collect();
        let refs: Vec<(&str, &str)> = rows.iter().map(|(t, a)| (t.as_str(), a.as_str())).collect();
        let entries = SelectorExtractor::new(40).extract(&chart_fixture(&refs));
        assert_eq!(entries.len(), 40);
        assert_eq!(entries[39].title, "Song 39");
    }

    #[test]
    fn test_pattern_matches_worker_layout() {
        let raw = r#"<div class="chart-name">
              <span>Lose Control</span></div>
            <div class="chart-artist"><span>Teddy Swims</span></div>
            <div class="chart-name"><span>Don&#39;t Stop</span></div>
            <div class="chart-artist"><span><b>Band</b> &amp; Friends</span></div>"#;
        let entries = PatternExtractor::new(50).extract(raw);
        assert_eq!(
            entries,
            vec![
                ChartEntry::new("Lose Control", "Teddy Swims").unwrap(),
                ChartEntry::new("Don't Stop", "Band & Friends").unwrap(),
            ]
        );
    }

    #[test]
    fn test_pattern_drops_blank_rows() {
        let raw = r#"<div class="chart-name"><span> </span></div><div class="chart-artist"><span>X</span></div>"#;
        assert!(PatternExtractor::new(50).extract(raw).is_empty());
    }

    #[test]
    fn test_fallback_uses_second_strategy() {
        // no .chart-item rows for the selector, but the regex still matches
        let raw = r#"<p class="chart-name"><span>Solo</span></p><p class="chart-artist"><span>Singer</span></p>"#;
        let extractor = FallbackExtractor::standard(50);
        let entries = extractor.extract(raw);
        assert_eq!(entries, vec![ChartEntry::new("Solo", "Singer").unwrap()]);
    }

    #[test]
    fn test_unrelated_markup_yields_nothing() {
        let raw = "<html><body><h1>Maintenance</h1><p>Back soon.</p></body></html>";
        assert!(FallbackExtractor::standard(50).extract(raw).is_empty());
    }
}
