//! Availability extraction and canonicalization.
//!
//! Whatever phrasing the page uses, the output is exactly one of four
//! canonical phrases so downstream sheets never carry free-form stock text:
//! `In stock`, `Only N left in stock`, `Out of stock`,
//! `Currently unavailable`.

use regex::Regex;
use scraper::Html;

use super::{element_text, page_text, sel};
use crate::text::clean_text;

/// Availability nodes, most reliable first.
const AVAILABILITY_SELECTORS: [&str; 4] = [
    "#availabilityInsideBuyBox_feature_div span",
    "#availability span",
    "#availabilityInsideBuyBox_feature_div",
    "#availability",
];

/// Match order matters: the scarcity phrase contains "in stock" and the
/// out-of-stock phrase must win over the in-stock substring it ends with.
const PHRASE_PATTERNS: [&str; 4] = [
    r"currently unavailable",
    r"out of stock",
    r"only\s+\d+\s+left(?:\s+in\s+stock)?",
    r"in stock",
];

/// Canonicalizes free text into one of the four availability phrases.
#[must_use]
pub fn classify_availability(text: &str) -> Option<String> {
    let collapsed = clean_text(text);
    if collapsed.is_empty() {
        return None;
    }
    let lower = collapsed.to_lowercase();

    for pattern in PHRASE_PATTERNS {
        let re = Regex::new(pattern).expect("valid regex");
        let Some(found) = re.find(&lower) else {
            continue;
        };
        let phrase = found.as_str();

        if phrase.starts_with("only") {
            let digits = Regex::new(r"\d+").expect("valid regex");
            let count = digits.find(phrase)?.as_str();
            return Some(format!("Only {count} left in stock"));
        }
        if phrase.contains("currently unavailable") {
            return Some("Currently unavailable".to_owned());
        }
        if phrase.contains("out of stock") {
            return Some("Out of stock".to_owned());
        }
        return Some("In stock".to_owned());
    }
    None
}

/// Extracts availability from the reliable DOM regions first, then the whole
/// page text. `None` means no recognizable phrase anywhere; the caller
/// substitutes the sentinel.
#[must_use]
pub fn availability(doc: &Html) -> Option<String> {
    for css in AVAILABILITY_SELECTORS {
        let Some(el) = doc.select(&sel(css)).next() else {
            continue;
        };
        if let Some(phrase) = classify_availability(&element_text(el)) {
            tracing::debug!(selector = css, phrase = %phrase, "availability node hit");
            return Some(phrase);
        }
    }
    classify_availability(&page_text(doc))
}
