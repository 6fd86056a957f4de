//! Offer-listing parsing: the "other sellers" document into [`OfferRecord`]s.

use regex::Regex;
use scraper::{ElementRef, Html};

use asinscan_core::{Asin, OfferRecord};

use crate::extract::{element_text, price_within, sel};
use crate::text::{clean_seller_name, clean_text, text_after_label};

/// Condition vocabulary matched on word boundaries, most specific first.
const CONDITIONS: [&str; 5] = ["New", "Used", "Refurbished", "Renewed", "Collectible"];

/// Parses the offer-listing document into zero or more offers.
///
/// An unparseable or empty document yields an empty list — offers are a
/// best-effort enrichment and must never block the product row.
#[must_use]
pub fn parse_offers(html: &str, asin: &Asin, marketplace_name: &str) -> Vec<OfferRecord> {
    let doc = Html::parse_document(html);
    let block_selector = sel(
        "div.a-section.a-spacing-none.a-padding-base.aod-information-block.aod-clear-float",
    );

    let offers: Vec<OfferRecord> = doc
        .select(&block_selector)
        .map(|block| parse_offer_block(block, asin, marketplace_name))
        .collect();

    tracing::debug!(asin = %asin, count = offers.len(), "parsed offer blocks");
    offers
}

fn parse_offer_block(block: ElementRef<'_>, asin: &Asin, marketplace_name: &str) -> OfferRecord {
    let block_text = element_text(block);
    let mut offer = OfferRecord::empty(asin, marketplace_name);

    if let Some(price) = price_within(block) {
        offer.offer_price = price;
    }

    if let Some(discount) = block
        .select(&sel(
            "span.a-size-medium.a-color-price.aok-align-center.centralizedApexPriceSavingsPercentageMargin.centralizedApexPriceSavingsOverrides",
        ))
        .next()
    {
        let text = element_text(discount);
        let re = Regex::new(r"-?\d{1,3}\s*%").expect("valid regex");
        if let Some(m) = re.find(&text) {
            offer.discount_percent = m.as_str().to_owned();
        }
    }

    if let Some(mrp_el) = block.select(&sel("span.a-text-price, .aod-mrp")).next() {
        let text = element_text(mrp_el);
        if !text.is_empty() {
            offer.mrp = text;
        }
    }

    if let Some(party) = labelled_offer_party(block, "[id^='aod-offer-soldBy']", &block_text, "Sold by") {
        offer.sold_by = party;
    }
    if let Some(party) =
        labelled_offer_party(block, "[id^='aod-offer-shipsFrom']", &block_text, "Ships from")
    {
        offer.ships_from = party;
    }

    if let Some(delivery) = text_after_label(&block_text, "Delivery") {
        offer.delivery_info = delivery;
    }

    let condition_re = |word: &str| {
        Regex::new(&format!(r"(?i)\b{word}\b")).expect("valid regex")
    };
    if let Some(condition) = CONDITIONS
        .iter()
        .find(|word| condition_re(word).is_match(&block_text))
    {
        offer.condition = (*condition).to_owned();
    }

    if let Some(rating) = seller_rating(block) {
        offer.rating = rating;
    }

    let perf_re = Regex::new(r"(?i)\d+%\s*positive[^.]*").expect("valid regex");
    if let Some(m) = perf_re.find(&block_text) {
        offer.seller_performance = clean_text(m.as_str());
    }

    offer
}

/// Seller or ships-from party: the id-prefixed node first, then the
/// label-anchored scan over the block text.
fn labelled_offer_party(
    block: ElementRef<'_>,
    id_selector: &str,
    block_text: &str,
    label: &str,
) -> Option<String> {
    let raw = block
        .select(&sel(id_selector))
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
        .or_else(|| text_after_label(block_text, label))?;
    let cleaned = clean_seller_name(&raw);
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Seller rating: the full `X out of 5 stars (N ratings)` phrase when
/// present, otherwise the star icon's accessible label.
fn seller_rating(block: ElementRef<'_>) -> Option<String> {
    let rating_block = block.select(&sel("div#aod-offer-seller-rating")).next()?;
    let text = element_text(rating_block);

    let re = Regex::new(r"(\d(\.\d)? out of 5 stars \([\d,]+ ratings\))").expect("valid regex");
    if let Some(m) = re.find(&text) {
        return Some(m.as_str().to_owned());
    }

    let stars = rating_block.select(&sel("i.a-icon-star-mini")).next()?;
    stars
        .value()
        .attr("aria-label")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .or_else(|| {
            let text = element_text(stars);
            (!text.is_empty()).then_some(text)
        })
}

#[cfg(test)]
#[path = "offers_test.rs"]
mod tests;
