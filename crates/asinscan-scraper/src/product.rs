//! Product-page parsing: one fetched document into one [`ProductRecord`].

use scraper::Html;

use asinscan_core::{Asin, ProductRecord};

use crate::extract;

/// Parses a product page into a record.
///
/// Returns `None` when the page has no product title — the marker that the
/// storefront served an error page, a bot interstitial, or an unknown ASIN —
/// so the fetcher can treat the attempt as "not found on this target".
/// Every other field degrades to its sentinel individually.
#[must_use]
pub fn parse_product(html: &str, asin: &Asin, marketplace_name: &str) -> Option<ProductRecord> {
    let doc = Html::parse_document(html);
    let title = extract::title(&doc)?;

    let mut record = ProductRecord::empty(asin, marketplace_name);
    record.title = title;

    if let Some(v) = extract::rating(&doc) {
        record.rating = v;
    }
    if let Some(v) = extract::total_reviews(&doc) {
        record.total_reviews = v;
    }
    if let Some(v) = extract::social_proof(&doc) {
        record.social_proof = v;
    }
    if let Some(v) = extract::choice_badge(&doc) {
        record.choice_badge = v;
    }
    if let Some(v) = extract::deal_badge(&doc) {
        record.deal_badge = v;
    }
    if let Some(v) = extract::best_seller_badge(&doc) {
        record.best_seller_badge = v;
    }
    if let Some(v) = extract::discount_percent(&doc) {
        record.discount_percent = v;
    }
    if let Some(v) = extract::offer_price(&doc) {
        record.offer_price = v;
    }
    if let Some(v) = extract::price_per_unit(&doc) {
        record.price_per_unit = v;
    }
    if let Some(v) = extract::mrp(&doc) {
        record.mrp = v;
    }

    let mut details = extract::item_details(&doc);
    if let Some(v) = details.remove("Brand") {
        record.brand = v;
    }
    if let Some(v) = details.remove("Model Number") {
        record.model_number = v;
    }
    if let Some(v) = details.remove("Country of Origin") {
        record.country_of_origin = v;
    }
    if let Some(v) = details.remove("Customer Reviews") {
        record.customer_reviews = v;
    }
    if let Some(v) = details.remove("Best Sellers Rank") {
        record.best_sellers_rank = v;
    }
    if let Some(v) = details.remove("Manufacturer") {
        record.manufacturer = v;
    }
    if let Some(v) = details.remove("Packer") {
        record.packer = v;
    }

    let buy_box = extract::buy_box(&doc);
    if let Some(v) = buy_box.availability {
        record.availability = v;
    }
    if let Some(v) = buy_box.delivery_info {
        record.delivery_info = v;
    }
    if let Some(v) = buy_box.ships_from {
        record.ships_from = v;
    }
    if let Some(v) = buy_box.sold_by {
        record.sold_by = v;
    }
    if buy_box.gift_options_available {
        record.gift_options = "Available".to_owned();
    }

    Some(record)
}
