//! Price, discount, and MRP extraction.
//!
//! Storefront price markup has several live layout variants: an offscreen
//! accessibility node (sometimes empty), a visible `aria-hidden` block built
//! from symbol/whole/fraction spans, and legacy price classes. The chains
//! below walk those variants before falling back to a currency regex over
//! page text.

use regex::Regex;
use scraper::{ElementRef, Html};

use super::{element_text, page_text, run_chain, sel, select_text, Strategy};
use crate::text::{clean_text, find_currency_amount};

/// Containers that hold the "price to pay" on current page layouts.
const PRICE_CONTAINERS: [&str; 5] = [
    "#corePriceDisplay_desktop_feature_div",
    "#corePrice_feature_div",
    "#apex_desktop",
    ".reinventPricePriceToPayMargin",
    ".a-section.a-spacing-none.aok-align-center.aok-relative",
];

/// The displayed offer price.
#[must_use]
pub fn offer_price(doc: &Html) -> Option<String> {
    const CHAIN: &[(&str, Strategy)] = &[
        ("container-offscreen", |doc| {
            PRICE_CONTAINERS.iter().find_map(|css| {
                let container = doc.select(&sel(css)).next()?;
                nonempty_text(container.select(&sel("span.a-price > span.a-offscreen")).next()?)
            })
        }),
        ("global-offscreen", |doc| {
            select_text(doc, "span.a-price > span.a-offscreen")
        }),
        ("container-composed", |doc| {
            PRICE_CONTAINERS
                .iter()
                .find_map(|css| compose_price(doc.select(&sel(css)).next()?))
        }),
        ("global-composed", |doc| compose_price(doc.root_element())),
        ("page-text-regex", |doc| find_currency_amount(&page_text(doc))),
    ];
    run_chain(doc, "offer_price", CHAIN)
}

/// Composes a price from the visible symbol/whole/fraction spans inside the
/// `aria-hidden` block (the layout used when the offscreen node is empty).
/// The fraction, when present, is joined with a decimal point; storefronts
/// that omit decimals simply have no fraction span.
fn compose_price(root: ElementRef<'_>) -> Option<String> {
    let block = root
        .select(&sel("span[aria-hidden='true']"))
        .next()
        .unwrap_or(root);
    let whole = nonempty_text(block.select(&sel("span.a-price-whole")).next()?)?;
    let symbol = block
        .select(&sel("span.a-price-symbol"))
        .next()
        .map(element_text)
        .unwrap_or_default();
    let fraction = block
        .select(&sel("span.a-price-fraction"))
        .next()
        .map(element_text)
        .unwrap_or_default();
    let composed = if fraction.is_empty() {
        format!("{symbol}{whole}")
    } else {
        format!("{symbol}{whole}.{fraction}")
    };
    Some(clean_text(&composed))
}

/// The per-unit price line, e.g. `"₹12.50 / 100 g"`.
#[must_use]
pub fn price_per_unit(doc: &Html) -> Option<String> {
    const CHAIN: &[(&str, Strategy)] = &[
        ("price-per-unit-class", |doc| select_text(doc, ".pricePerUnit")),
        ("class-substring-scan", |doc| {
            doc.select(&sel("span[class]"))
                .find(|el| {
                    el.value()
                        .attr("class")
                        .is_some_and(|c| c.to_lowercase().contains("priceperunit"))
                })
                .map(element_text)
                .filter(|t| !t.is_empty())
        }),
    ];
    run_chain(doc, "price_per_unit", CHAIN)
}

/// Discount percentage, normalized to a leading-minus form like `"-23%"`.
#[must_use]
pub fn discount_percent(doc: &Html) -> Option<String> {
    const SAVINGS_SELECTOR: &str = "span.savingsPercentage, \
         span.reinventPriceSavingsPercentageMargin.savingsPercentage, \
         span.centralizedApexPriceSavingsPercentageMargin.centralizedApexPriceSavingsOverrides";

    const CHAIN: &[(&str, Strategy)] = &[
        ("savings-spans", |doc| {
            doc.select(&sel(SAVINGS_SELECTOR))
                .find_map(|el| normalize_percent(&element_text(el)))
        }),
        ("price-block-spans", |doc| {
            let container = doc
                .select(&sel("div.a-section.a-spacing-none.aok-align-center.aok-relative"))
                .next()?;
            container
                .select(&sel(
                    "span.savingsPercentage, span.reinventPriceSavingsPercentageMargin.savingsPercentage",
                ))
                .find_map(|el| normalize_percent(&element_text(el)))
        }),
        ("offscreen-savings", |doc| {
            let text = select_text(doc, "span.aok-offscreen")?;
            let re = Regex::new(r"(?i)(-?\d{1,3})\s*%(\s*savings)?").expect("valid regex");
            let num = re.captures(&text)?.get(1)?.as_str();
            Some(signed_percent(num))
        }),
    ];
    run_chain(doc, "discount_percent", CHAIN)
}

fn normalize_percent(text: &str) -> Option<String> {
    let re = Regex::new(r"(-?\d{1,3})\s*%").expect("valid regex");
    let num = re.captures(text)?.get(1)?.as_str();
    Some(signed_percent(num))
}

fn signed_percent(num: &str) -> String {
    if num.starts_with('-') {
        format!("{num}%")
    } else {
        format!("-{num}%")
    }
}

/// Strike-through list price (MRP).
#[must_use]
pub fn mrp(doc: &Html) -> Option<String> {
    const CHAIN: &[(&str, Strategy)] = &[
        ("text-price-span", |doc| {
            let text = select_text(doc, "span.a-text-price")?;
            let stripped = clean_text(&text.replace("M.R.P.:", ""));
            (!stripped.is_empty()).then_some(stripped)
        }),
        ("strike-price-classes", |doc| {
            select_text(
                doc,
                ".priceBlockStrikePriceString, .a-size-base.a-color-secondary.a-text-strike",
            )
        }),
    ];
    run_chain(doc, "mrp", CHAIN)
}

/// Price lookup scoped to one element subtree — used per offer block, where
/// the page-level containers do not apply.
pub(crate) fn price_within(block: ElementRef<'_>) -> Option<String> {
    if let Some(text) = block
        .select(&sel("span.a-price > span.a-offscreen"))
        .next()
        .and_then(nonempty_text)
    {
        return Some(text);
    }
    if let Some(text) = block
        .select(&sel("span.a-offscreen"))
        .next()
        .and_then(nonempty_text)
    {
        return Some(text);
    }
    if let Some(composed) = compose_price(block) {
        return Some(composed);
    }
    if let Some(text) = block
        .select(&sel(".offer-price, .price, .a-color-price"))
        .next()
        .map(element_text)
        .and_then(|t| find_currency_amount(&t))
    {
        return Some(text);
    }
    find_currency_amount(&element_text(block))
}

fn nonempty_text(el: ElementRef<'_>) -> Option<String> {
    let text = element_text(el);
    (!text.is_empty()).then_some(text)
}
