//! Item-detail table extraction and the brand fallback chain.

use std::collections::HashMap;

use scraper::{ElementRef, Html};

use super::{element_text, sel};

/// The only detail-table labels admitted into output rows.
pub const ALLOWED_DETAIL_LABELS: [&str; 7] = [
    "Brand",
    "Model Number",
    "Country of Origin",
    "Customer Reviews",
    "Best Sellers Rank",
    "Manufacturer",
    "Packer",
];

/// Reads the product-details table into a label→value map, filtered to
/// [`ALLOWED_DETAIL_LABELS`]. The brand entry is always present, filled via
/// its own fallback chain when the table lacks it.
#[must_use]
pub fn item_details(doc: &Html) -> HashMap<String, String> {
    let mut details = HashMap::new();

    let table = doc
        .select(&sel("#prodDetails"))
        .next()
        .or_else(|| doc.select(&sel("table#productDetails_techSpec_section_1")).next());

    if let Some(table) = table {
        for row in table.select(&sel("tr")) {
            let cells: Vec<ElementRef<'_>> = row.select(&sel("th, td")).collect();
            if cells.len() != 2 {
                continue;
            }
            let key = element_text(cells[0]);
            let value = element_text(cells[1]);
            if ALLOWED_DETAIL_LABELS.contains(&key.as_str()) && !value.is_empty() {
                details.insert(key, value);
            }
        }
    }

    if !details.contains_key("Brand") {
        if let Some(brand) = brand_fallback(doc) {
            details.insert("Brand".to_owned(), brand);
        }
    }

    details
}

/// Brand lookup for pages whose detail table omits it: the product-overview
/// grid, then the detail-bullets list, then the byline link.
fn brand_fallback(doc: &Html) -> Option<String> {
    if let Some(overview) = doc.select(&sel("#productOverview_feature_div")).next() {
        for row in overview.select(&sel("tr")) {
            let cells: Vec<ElementRef<'_>> = row.select(&sel("td")).collect();
            if cells.len() == 2 && element_text(cells[0]).contains("Brand") {
                let value = element_text(cells[1]);
                if !value.is_empty() {
                    tracing::debug!(tier = "product-overview", "brand fallback hit");
                    return Some(value);
                }
            }
        }
    }

    if let Some(bullets) = doc.select(&sel("#detailBullets_feature_div")).next() {
        for bold in bullets.select(&sel("span.a-text-bold")) {
            if !element_text(bold).contains("Brand") {
                continue;
            }
            let next_span = bold
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == "span");
            if let Some(span) = next_span {
                let value = element_text(span);
                if !value.is_empty() {
                    tracing::debug!(tier = "detail-bullets", "brand fallback hit");
                    return Some(value);
                }
            }
        }
    }

    let byline = element_text(doc.select(&sel("a#bylineInfo")).next()?);
    if byline.is_empty() {
        None
    } else {
        tracing::debug!(tier = "byline", "brand fallback hit");
        Some(byline)
    }
}
