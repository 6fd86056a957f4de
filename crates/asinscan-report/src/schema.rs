//! Fixed table schemas and the mechanical record→row assembler.
//!
//! Every output sheet has a declared column order and a fill value applied
//! uniformly, so the schema is stable regardless of which fields a given run
//! actually extracted.

use asinscan_core::{Asin, CompetitorRecord, OfferRecord, ProductRecord, SearchSeedMap};

/// Ordered column list plus the value substituted for any unset cell.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub columns: &'static [&'static str],
    pub fill: &'static str,
}

/// The `Products` sheet.
pub const PRODUCTS_SCHEMA: TableSchema = TableSchema {
    columns: &[
        "ASIN",
        "Marketplace",
        "Product Title",
        "Rating",
        "Total Reviews",
        "Social Bought",
        "Amazons_Choice_Text",
        "Deal_Badge_Text",
        "Best_Seller_Text",
        "Discount %",
        "Offer Price",
        "Price per Unit",
        "MRP",
        "Brand",
        "Model Number",
        "Country of Origin",
        "Customer Reviews",
        "Best Sellers Rank",
        "Manufacturer",
        "Packer",
        "Availability",
        "Delivery info",
        "Ships from",
        "Sold by",
        "Gift options",
    ],
    fill: "N/A",
};

/// The `OtherSellers` sheet. `Sold By` sits ahead of the marketplace so the
/// seller reads next to its ASIN.
pub const OTHER_SELLERS_SCHEMA: TableSchema = TableSchema {
    columns: &[
        "ASIN",
        "Sold By",
        "Marketplace",
        "Offer Price",
        "Discount %",
        "MRP",
        "Ships From",
        "Delivery Info",
        "Condition",
        "Rating",
        "Seller Performance",
    ],
    fill: "N/A",
};

/// The `Competitors` sheet.
pub const COMPETITORS_SCHEMA: TableSchema = TableSchema {
    columns: &[
        "Search_ASIN",
        "Competitor_ASIN",
        "Title",
        "Marketplace",
        "Product_Link",
    ],
    fill: "N/A",
};

/// A fully materialized sheet: header plus uniform-width rows.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn build(schema: TableSchema, rows: Vec<Vec<String>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| {
                        if cell.trim().is_empty() {
                            schema.fill.to_owned()
                        } else {
                            cell
                        }
                    })
                    .collect()
            })
            .collect();
        Self {
            columns: schema.columns.iter().map(|c| (*c).to_owned()).collect(),
            rows,
        }
    }

    #[must_use]
    pub fn products(records: &[ProductRecord]) -> Self {
        let rows = records
            .iter()
            .map(|r| {
                vec![
                    r.asin.clone(),
                    r.marketplace.clone(),
                    r.title.clone(),
                    r.rating.clone(),
                    r.total_reviews.clone(),
                    r.social_proof.clone(),
                    r.choice_badge.clone(),
                    r.deal_badge.clone(),
                    r.best_seller_badge.clone(),
                    r.discount_percent.clone(),
                    r.offer_price.clone(),
                    r.price_per_unit.clone(),
                    r.mrp.clone(),
                    r.brand.clone(),
                    r.model_number.clone(),
                    r.country_of_origin.clone(),
                    r.customer_reviews.clone(),
                    r.best_sellers_rank.clone(),
                    r.manufacturer.clone(),
                    r.packer.clone(),
                    r.availability.clone(),
                    r.delivery_info.clone(),
                    r.ships_from.clone(),
                    r.sold_by.clone(),
                    r.gift_options.clone(),
                ]
            })
            .collect();
        Self::build(PRODUCTS_SCHEMA, rows)
    }

    #[must_use]
    pub fn other_sellers(offers: &[OfferRecord]) -> Self {
        let rows = offers
            .iter()
            .map(|o| {
                vec![
                    o.asin.clone(),
                    o.sold_by.clone(),
                    o.marketplace.clone(),
                    o.offer_price.clone(),
                    o.discount_percent.clone(),
                    o.mrp.clone(),
                    o.ships_from.clone(),
                    o.delivery_info.clone(),
                    o.condition.clone(),
                    o.rating.clone(),
                    o.seller_performance.clone(),
                ]
            })
            .collect();
        Self::build(OTHER_SELLERS_SCHEMA, rows)
    }

    #[must_use]
    pub fn competitors(records: &[CompetitorRecord]) -> Self {
        let rows = records
            .iter()
            .map(|r| {
                vec![
                    r.seed_asin.clone(),
                    r.competitor_asin.clone(),
                    r.title.clone(),
                    r.marketplace_flag.clone(),
                    r.product_link.clone(),
                ]
            })
            .collect();
        Self::build(COMPETITORS_SCHEMA, rows)
    }

    /// Prepends a `Search_ASIN` column resolving each row's ASIN (column 0)
    /// through the seed map. Rows whose ASIN is unrelated to the run get the
    /// fill value.
    pub fn annotate_search_seed(&mut self, map: &SearchSeedMap) {
        self.columns.insert(0, "Search_ASIN".to_owned());
        for row in &mut self.rows {
            let annotation = row
                .first()
                .and_then(|cell| Asin::parse(cell))
                .and_then(|asin| map.seed_for(&asin))
                .map_or_else(|| "N/A".to_owned(), |seed| seed.as_str().to_owned());
            row.insert(0, annotation);
        }
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
