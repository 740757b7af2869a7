//! Small HTML text helpers for pattern-based extraction

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Decode the entities that show up in chart markup
pub fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        // last, so "&amp;lt;" decodes to "&lt;" rather than "<"
        .replace("&amp;", "&")
}

/// Strip tags, decode entities and collapse whitespace
pub fn inner_text(fragment: &str) -> String {
    let stripped = TAG_RE.replace_all(fragment, " ");
    let decoded = decode_entities(&stripped);
    WS_RE.replace_all(decoded.trim(), " ").into_owned()
}
