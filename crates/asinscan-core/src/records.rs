//! Row-level entities produced by a scraping run.
//!
//! Every field is a `String` defaulting to a sentinel rather than an
//! `Option`: downstream tabulation writes fixed-schema sheets and must never
//! need conditional columns. A missing value is data, not an error.

use serde::Serialize;

use crate::asin::Asin;

/// Placeholder for any field that could not be extracted.
pub const NOT_AVAILABLE: &str = "N/A";
/// Placeholder for a product with no visible discount.
pub const NO_DISCOUNT: &str = "NO %";
/// Placeholder for an absent merchandising badge.
pub const BADGE_UNAVAILABLE: &str = "unavailable";

/// One successful (or synthesized) product-page scrape for an ASIN on one
/// marketplace.
#[derive(Debug, Clone, Serialize)]
pub struct ProductRecord {
    pub asin: String,
    pub marketplace: String,
    pub title: String,
    pub rating: String,
    pub total_reviews: String,
    pub social_proof: String,
    pub choice_badge: String,
    pub deal_badge: String,
    pub best_seller_badge: String,
    pub discount_percent: String,
    pub offer_price: String,
    pub price_per_unit: String,
    pub mrp: String,
    pub brand: String,
    pub model_number: String,
    pub country_of_origin: String,
    pub customer_reviews: String,
    pub best_sellers_rank: String,
    pub manufacturer: String,
    pub packer: String,
    pub availability: String,
    pub delivery_info: String,
    pub ships_from: String,
    pub sold_by: String,
    pub gift_options: String,
}

impl ProductRecord {
    /// A record with every field at its sentinel, ready to be filled by the
    /// extractor.
    #[must_use]
    pub fn empty(asin: &Asin, marketplace: &str) -> Self {
        Self {
            asin: asin.as_str().to_owned(),
            marketplace: marketplace.to_owned(),
            title: NOT_AVAILABLE.to_owned(),
            rating: NOT_AVAILABLE.to_owned(),
            total_reviews: NOT_AVAILABLE.to_owned(),
            social_proof: NOT_AVAILABLE.to_owned(),
            choice_badge: BADGE_UNAVAILABLE.to_owned(),
            deal_badge: BADGE_UNAVAILABLE.to_owned(),
            best_seller_badge: BADGE_UNAVAILABLE.to_owned(),
            discount_percent: NO_DISCOUNT.to_owned(),
            offer_price: NOT_AVAILABLE.to_owned(),
            price_per_unit: NOT_AVAILABLE.to_owned(),
            mrp: NOT_AVAILABLE.to_owned(),
            brand: NOT_AVAILABLE.to_owned(),
            model_number: NOT_AVAILABLE.to_owned(),
            country_of_origin: NOT_AVAILABLE.to_owned(),
            customer_reviews: NOT_AVAILABLE.to_owned(),
            best_sellers_rank: NOT_AVAILABLE.to_owned(),
            manufacturer: NOT_AVAILABLE.to_owned(),
            packer: NOT_AVAILABLE.to_owned(),
            availability: NOT_AVAILABLE.to_owned(),
            delivery_info: NOT_AVAILABLE.to_owned(),
            ships_from: NOT_AVAILABLE.to_owned(),
            sold_by: NOT_AVAILABLE.to_owned(),
            gift_options: "Not available".to_owned(),
        }
    }

    /// The synthetic row recorded when an ASIN was found on no marketplace
    /// after all retries. A missing product terminates in data, not an error.
    #[must_use]
    pub fn not_found(asin: &Asin) -> Self {
        let mut record = Self::empty(asin, NOT_AVAILABLE);
        record.title = "Not Found".to_owned();
        record.discount_percent = NOT_AVAILABLE.to_owned();
        record.gift_options = NOT_AVAILABLE.to_owned();
        record
    }
}

/// One third-party offer discovered on the offer-listing endpoint for a
/// found product.
#[derive(Debug, Clone, Serialize)]
pub struct OfferRecord {
    pub asin: String,
    pub sold_by: String,
    pub marketplace: String,
    pub offer_price: String,
    pub discount_percent: String,
    pub mrp: String,
    pub ships_from: String,
    pub delivery_info: String,
    pub condition: String,
    pub rating: String,
    pub seller_performance: String,
}

impl OfferRecord {
    #[must_use]
    pub fn empty(asin: &Asin, marketplace: &str) -> Self {
        Self {
            asin: asin.as_str().to_owned(),
            sold_by: NOT_AVAILABLE.to_owned(),
            marketplace: marketplace.to_owned(),
            offer_price: NOT_AVAILABLE.to_owned(),
            discount_percent: NO_DISCOUNT.to_owned(),
            mrp: NOT_AVAILABLE.to_owned(),
            ships_from: NOT_AVAILABLE.to_owned(),
            delivery_info: NOT_AVAILABLE.to_owned(),
            condition: NOT_AVAILABLE.to_owned(),
            rating: NOT_AVAILABLE.to_owned(),
            seller_performance: NOT_AVAILABLE.to_owned(),
        }
    }
}

/// One (seed ASIN, discovered competitor) pair harvested from the discovery
/// portal. Fields other than `seed_asin` may be empty when a card degraded
/// to partial extraction.
#[derive(Debug, Clone, Serialize)]
pub struct CompetitorRecord {
    pub seed_asin: String,
    pub competitor_asin: String,
    pub title: String,
    pub marketplace_flag: String,
    pub product_link: String,
}
