//! Field extraction over fetched product pages.
//!
//! Every field is an ordered chain of extraction strategies, tried
//! first-hit-wins: a known-good structured lookup, a layout-variant
//! alternate, a label-anchored text scan, and finally a regex over page
//! text. A chain that misses on every tier yields `None` and the caller
//! substitutes the sentinel — extraction never fails.

mod availability;
mod badges;
mod buybox;
mod details;
mod price;
mod review;

pub use availability::{availability, classify_availability};
pub use badges::{best_seller_badge, choice_badge, deal_badge};
pub use buybox::{buy_box, BuyBox};
pub use details::{item_details, ALLOWED_DETAIL_LABELS};
pub use price::{discount_percent, mrp, offer_price, price_per_unit};
pub(crate) use price::price_within;
pub use review::{rating, social_proof, title, total_reviews};

use scraper::{ElementRef, Html, Selector};

use crate::text::clean_text;

/// A single extraction tier: pure lookup over the parsed document.
pub(crate) type Strategy = fn(&Html) -> Option<String>;

/// Runs the tiers of `chain` in order and returns the first hit.
pub(crate) fn run_chain(doc: &Html, field: &str, chain: &[(&str, Strategy)]) -> Option<String> {
    for &(tier, strategy) in chain {
        if let Some(value) = strategy(doc) {
            tracing::debug!(field, tier, "extraction tier hit");
            return Some(value);
        }
    }
    None
}

/// Parses a static CSS selector known to be valid.
pub(crate) fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// Whitespace-collapsed text content of one element.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    clean_text(&el.text().collect::<Vec<_>>().join(" "))
}

/// Text of the first match for `css`, or `None` when absent or empty.
pub(crate) fn select_text(doc: &Html, css: &str) -> Option<String> {
    let text = element_text(doc.select(&sel(css)).next()?);
    (!text.is_empty()).then_some(text)
}

/// Whitespace-collapsed text of the whole document.
pub(crate) fn page_text(doc: &Html) -> String {
    clean_text(&doc.root_element().text().collect::<Vec<_>>().join(" "))
}
