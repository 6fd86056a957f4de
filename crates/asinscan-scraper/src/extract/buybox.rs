//! Buy-box extraction: availability, fulfilment parties, delivery, gifting.

use regex::Regex;
use scraper::{ElementRef, Html};

use super::availability::{availability, classify_availability};
use super::{element_text, sel};
use crate::text::{clean_seller_name, clean_text, text_after_label};

/// Fields sourced from the buy box. `None` means "not extractable"; the
/// record assembler substitutes sentinels.
#[derive(Debug, Default)]
pub struct BuyBox {
    pub availability: Option<String>,
    pub delivery_info: Option<String>,
    pub ships_from: Option<String>,
    pub sold_by: Option<String>,
    pub gift_options_available: bool,
}

/// Extracts the buy-box fields. The precise availability classifier runs
/// first; the buy-box text only backfills a miss.
#[must_use]
pub fn buy_box(doc: &Html) -> BuyBox {
    let mut out = BuyBox {
        availability: availability(doc),
        ..BuyBox::default()
    };

    let Some(buybox) = doc
        .select(&sel("div#desktop_qualifiedBuyBox"))
        .next()
        .or_else(|| doc.select(&sel("div#buybox")).next())
    else {
        return out;
    };
    let box_text = element_text(buybox);

    if out.availability.is_none() {
        out.availability = classify_availability(&box_text)
            .filter(|p| p == "In stock" || p == "Out of stock");
    }

    if let Some(inner) = buybox.select(&sel("div.a-box-inner")).next() {
        out.ships_from = labelled_party(inner, "Ships from");
        out.sold_by = labelled_party(inner, "Sold by");
    }
    if out.ships_from.is_none() {
        out.ships_from = text_after_label(&box_text, "Ships from")
            .map(|v| clean_seller_name(&v))
            .filter(|v| !v.is_empty());
    }
    if out.sold_by.is_none() {
        out.sold_by = text_after_label(&box_text, "Sold by")
            .map(|v| clean_seller_name(&v))
            .filter(|v| !v.is_empty());
    }

    if let Some(delivery) = doc
        .select(&sel("div#mir-layout-DELIVERY_BLOCK-slot-PRIMARY_DELIVERY_MESSAGE_LARGE"))
        .next()
    {
        let text = element_text(delivery)
            .replace("Details", "")
            .replace("Update location", "");
        let text = clean_text(&text);
        if !text.is_empty() {
            out.delivery_info = Some(text);
        }
    }

    let gift_re = Regex::new(r"(?i)Gift options").expect("valid regex");
    out.gift_options_available = gift_re.is_match(&box_text);

    out
}

/// Structured tier for `Ships from` / `Sold by`: find the label node inside
/// the buy-box inner block, take its next sibling element's text. Falls back
/// to a label-anchored scan over the block text.
fn labelled_party(inner: ElementRef<'_>, label: &str) -> Option<String> {
    let label_lower = label.to_lowercase();

    for el in inner.select(&sel("span, div")) {
        let own = element_text(el);
        let own_lower = own.to_lowercase();
        if own_lower != label_lower && own_lower != format!("{label_lower}:") {
            continue;
        }
        let sibling_text = el
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .map(element_text)
            .find(|t| !t.is_empty());
        if let Some(text) = sibling_text {
            let value = clean_seller_name(&text);
            if !value.is_empty() {
                return Some(value);
            }
        }
    }

    text_after_label(&element_text(inner), label)
        .map(|v| clean_seller_name(&v))
        .filter(|v| !v.is_empty())
}
