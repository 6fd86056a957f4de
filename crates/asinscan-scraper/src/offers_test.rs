use super::*;
use asinscan_core::{NOT_AVAILABLE, NO_DISCOUNT};

fn asin() -> Asin {
    Asin::parse("B0ABCDEFGH").unwrap()
}

const OFFER_BLOCK_OPEN: &str =
    r#"<div class="a-section a-spacing-none a-padding-base aod-information-block aod-clear-float">"#;

#[test]
fn empty_document_yields_no_offers() {
    assert!(parse_offers("", &asin(), "Amazon India").is_empty());
    assert!(parse_offers("<html><body></body></html>", &asin(), "Amazon India").is_empty());
}

#[test]
fn page_without_offer_blocks_yields_no_offers() {
    let html = r#"<div class="a-section">unrelated content</div>"#;
    assert!(parse_offers(html, &asin(), "Amazon India").is_empty());
}

#[test]
fn fully_structured_block_is_parsed() {
    let html = format!(
        r#"{OFFER_BLOCK_OPEN}
            <span class="a-price"><span class="a-offscreen">₹1,149.00</span></span>
            <span class="a-size-medium a-color-price aok-align-center centralizedApexPriceSavingsPercentageMargin centralizedApexPriceSavingsOverrides">-12%</span>
            <span class="a-text-price">₹1,299.00</span>
            <div id="aod-offer-soldBy-1">RetailNet</div>
            <div id="aod-offer-shipsFrom-1">Amazon</div>
            <div>Condition: New</div>
            <div id="aod-offer-seller-rating">
                4.5 out of 5 stars (1,234 ratings)
            </div>
            <div>98% positive over the last 12 months</div>
        </div>"#
    );
    let offers = parse_offers(&html, &asin(), "Amazon India");
    assert_eq!(offers.len(), 1);
    let offer = &offers[0];
    assert_eq!(offer.asin, "B0ABCDEFGH");
    assert_eq!(offer.marketplace, "Amazon India");
    assert_eq!(offer.offer_price, "₹1,149.00");
    assert_eq!(offer.discount_percent, "-12%");
    assert_eq!(offer.mrp, "₹1,299.00");
    assert_eq!(offer.sold_by, "RetailNet");
    assert_eq!(offer.ships_from, "Amazon");
    assert_eq!(offer.condition, "New");
    assert_eq!(offer.rating, "4.5 out of 5 stars (1,234 ratings)");
    assert!(offer.seller_performance.starts_with("98% positive"));
}

#[test]
fn degraded_block_falls_back_to_label_scans() {
    let html = format!(
        r#"{OFFER_BLOCK_OPEN}
            <p>Price $23.99 Ships from WarehouseCo Sold by OutletPlus Delivery August 12 Condition Used item</p>
        </div>"#
    );
    let offers = parse_offers(&html, &asin(), "Amazon USA");
    assert_eq!(offers.len(), 1);
    let offer = &offers[0];
    assert_eq!(offer.offer_price, "$23.99");
    assert_eq!(offer.ships_from, "WarehouseCo");
    assert_eq!(offer.sold_by, "OutletPlus");
    assert_eq!(offer.delivery_info, "August 12");
    assert_eq!(offer.condition, "Used");
}

#[test]
fn bare_block_keeps_sentinels() {
    let html = format!("{OFFER_BLOCK_OPEN}<p>third-party offer</p></div>");
    let offers = parse_offers(&html, &asin(), "Amazon UK");
    assert_eq!(offers.len(), 1);
    let offer = &offers[0];
    assert_eq!(offer.offer_price, NOT_AVAILABLE);
    assert_eq!(offer.discount_percent, NO_DISCOUNT);
    assert_eq!(offer.sold_by, NOT_AVAILABLE);
    assert_eq!(offer.rating, NOT_AVAILABLE);
}

#[test]
fn rating_falls_back_to_the_star_icon_label() {
    let html = format!(
        r#"{OFFER_BLOCK_OPEN}
            <div id="aod-offer-seller-rating">
                <i class="a-icon-star-mini" aria-label="4.1 out of 5 stars"></i>
            </div>
        </div>"#
    );
    let offers = parse_offers(&html, &asin(), "Amazon India");
    assert_eq!(offers[0].rating, "4.1 out of 5 stars");
}

#[test]
fn multiple_blocks_yield_multiple_offers() {
    let html = format!(
        "{OFFER_BLOCK_OPEN}<div id=\"aod-offer-soldBy-1\">SellerOne</div></div>\
         {OFFER_BLOCK_OPEN}<div id=\"aod-offer-soldBy-2\">SellerTwo</div></div>"
    );
    let offers = parse_offers(&html, &asin(), "Amazon India");
    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0].sold_by, "SellerOne");
    assert_eq!(offers[1].sold_by, "SellerTwo");
}
