//! Text scrubbing shared by the field extractors and the offer parser.
//!
//! Storefront markup mixes the value we want with rating stars, review
//! counts, percentage badges, and label prefixes in one text blob; these
//! helpers strip that noise after any extraction tier has fired.

use regex::Regex;

/// Phrases that terminate a label-anchored extraction. The value for a label
/// like `Sold by` runs until the next section of the buy box begins.
const STOPPERS: [&str; 8] = [
    "Ships from",
    "Sold by",
    "Delivery",
    "Condition",
    "Add to Cart",
    "Add to Basket",
    "Buy Now",
    "Details",
];

/// Hard cap on a label-anchored value when no stopper phrase follows it.
const LABEL_VALUE_CAP: usize = 200;

/// Collapses all whitespace runs to single spaces and trims.
pub(crate) fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Scrubs a seller/ships-from string: drops star ratings, review counts,
/// percentage tails, and `Sold by` / `Ships from` label prefixes.
pub(crate) fn clean_seller_name(raw: &str) -> String {
    let mut s = raw.trim().to_owned();
    for pattern in [
        r"(?i)\d+(\.\d+)?\s*out of\s*5",
        r"(?i)\(\s*[\d,]+\s*(ratings|rating)?\s*\)",
        r"\d+%.*",
        r"(?i)Sold by\s*[:\-–]?",
        r"(?i)Ships from\s*[:\-–]?",
    ] {
        let re = Regex::new(pattern).expect("valid regex");
        s = re.replace_all(&s, "").into_owned();
    }
    clean_text(&s)
}

/// Extracts the text following `label` inside `block_text`, up to the first
/// stopper phrase, then scrubs decorative noise. Case-insensitive on both
/// the label and the stoppers. Returns `None` when the label is absent or
/// nothing usable remains.
pub(crate) fn text_after_label(block_text: &str, label: &str) -> Option<String> {
    let label_re =
        Regex::new(&format!("(?i){}", regex::escape(label))).expect("valid regex");
    let found = label_re.find(block_text)?;
    let remainder = block_text[found.end()..].trim_start();

    let end = STOPPERS
        .iter()
        .filter_map(|stopper| {
            let re = Regex::new(&format!("(?i){}", regex::escape(stopper))).expect("valid regex");
            re.find(remainder).map(|m| m.start())
        })
        .min()
        .unwrap_or_else(|| floor_char_boundary(remainder, LABEL_VALUE_CAP));

    let mut candidate = remainder[..end].trim().to_owned();
    for pattern in [
        r"(?i)\d+(\.\d+)?\s*out of\s*5",
        r"(?i)\(\s*[\d,]+\s*(ratings|rating)?\s*\)",
        r"(?i)\d+%.*",
        r"(?i)Details$",
    ] {
        let re = Regex::new(pattern).expect("valid regex");
        candidate = re.replace_all(&candidate, "").into_owned();
    }
    let cleaned = clean_text(&candidate);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// First currency-prefixed amount (`₹`, `$`, or `£`) in `text`, verbatim.
pub(crate) fn find_currency_amount(text: &str) -> Option<String> {
    let re = Regex::new(r"(₹\s?[\d,]+(?:\.\d+)?|\$\s?[\d,]+(?:\.\d+)?|£\s?[\d,]+(?:\.\d+)?)")
        .expect("valid regex");
    re.find(text).map(|m| clean_text(m.as_str()))
}

/// Largest byte index `<= at` that lies on a char boundary of `s`.
fn floor_char_boundary(s: &str, at: usize) -> usize {
    if at >= s.len() {
        return s.len();
    }
    (0..=at).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}
