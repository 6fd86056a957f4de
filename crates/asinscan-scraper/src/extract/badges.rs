//! Merchandising badge extraction.
//!
//! Badge absence is common and meaningful; the callers substitute the badge
//! sentinel rather than the generic one.

use regex::Regex;
use scraper::Html;

use super::{element_text, sel};

/// The Amazon's Choice rectangle. Canonicalized to a fixed string — the
/// badge carries keyword context we do not want in the column.
#[must_use]
pub fn choice_badge(doc: &Html) -> Option<String> {
    let container = doc
        .select(&sel("span.aok-float-left.mvt-ac-badge-rectangle"))
        .next()?;
    let re = Regex::new(r"(?i)Amazon['’]s\s+Choice").expect("valid regex");
    re.is_match(&element_text(container))
        .then(|| "Amazon's Choice".to_owned())
}

/// Deal badge supporting text, preferring the accessible label.
#[must_use]
pub fn deal_badge(doc: &Html) -> Option<String> {
    let el = doc.select(&sel("#dealBadgeSupportingText")).next()?;
    let text = el
        .value()
        .attr("aria-label")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| element_text(el));
    (!text.is_empty()).then_some(text)
}

/// The `#1 Best Seller` badge, canonicalized.
#[must_use]
pub fn best_seller_badge(doc: &Html) -> Option<String> {
    let container = doc
        .select(&sel("span.a-size-small.a-color-inverse[aria-label*='Best Seller']"))
        .next()?;
    let re = Regex::new(r"(?i)#\s*1\s+Best\s+Seller").expect("valid regex");
    re.is_match(&element_text(container))
        .then(|| "#1 Best Seller".to_owned())
}
