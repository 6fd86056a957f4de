//! Title, rating, review-count, and social-proof extraction.

use regex::Regex;
use scraper::Html;

use super::{element_text, run_chain, sel, select_text, Strategy};

/// Product title. A page without one is treated upstream as "not found on
/// this target", so there is deliberately no fallback tier here.
#[must_use]
pub fn title(doc: &Html) -> Option<String> {
    select_text(doc, "span#productTitle")
}

/// Star rating, e.g. `"4.3 out of 5 stars"`.
#[must_use]
pub fn rating(doc: &Html) -> Option<String> {
    const CHAIN: &[(&str, Strategy)] = &[
        ("average-reviews-block", |doc| {
            select_text(doc, "#averageCustomerReviews_feature_div span.a-icon-alt")
        }),
        ("global-icon-alt", |doc| select_text(doc, "span.a-icon-alt")),
    ];
    run_chain(doc, "rating", CHAIN)
}

/// Total review count, e.g. `"1,204 ratings"`.
#[must_use]
pub fn total_reviews(doc: &Html) -> Option<String> {
    const CHAIN: &[(&str, Strategy)] = &[
        ("average-reviews-block", |doc| {
            select_text(doc, "#averageCustomerReviews_feature_div #acrCustomerReviewText")
        }),
        ("ratings-regex", |doc| {
            let block = doc
                .select(&sel("#averageCustomerReviews_feature_div"))
                .next()
                .map(element_text)?;
            let re = Regex::new(r"(?i)([\d,]+)\s*(ratings|rating)\b").expect("valid regex");
            re.find(&block).map(|m| m.as_str().to_owned())
        }),
        ("global-review-text", |doc| {
            select_text(doc, "span#acrCustomerReviewText")
        }),
    ];
    run_chain(doc, "total_reviews", CHAIN)
}

/// The "N+ bought in past month" social-proof line.
#[must_use]
pub fn social_proof(doc: &Html) -> Option<String> {
    const CHAIN: &[(&str, Strategy)] = &[
        ("bought-faceout", |doc| {
            select_text(doc, "#social-proofing-faceout-title-tk_bought")
        }),
        // Layout variants keep the id prefix but vary the suffix.
        ("faceout-id-scan", |doc| {
            doc.select(&sel("[id^='social-proofing-faceout-title']"))
                .find(|el| {
                    el.value()
                        .attr("id")
                        .is_some_and(|id| id.to_lowercase().contains("bought"))
                })
                .map(element_text)
                .filter(|t| !t.is_empty())
        }),
    ];
    run_chain(doc, "social_proof", CHAIN)
}
