//! Card-to-record extraction with the structured→fallback ladder.

use regex::Regex;

use asinscan_core::{Asin, CompetitorRecord};

use crate::page::RawCard;

/// Lines shorter than this cannot be a product title.
const MIN_TITLE_LEN: usize = 5;

fn asin_pattern() -> Regex {
    Regex::new(r"\bB0[A-Z0-9]{8}\b").expect("valid regex")
}

/// First line of a text blob that is plausibly a title: not an ASIN line,
/// not a UI word, not a fragment. Used when the structured title node is
/// missing from a card.
#[must_use]
pub fn first_non_asin_line(text: &str) -> Option<String> {
    let pattern = asin_pattern();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find(|line| {
            !pattern.is_match(line)
                && line.len() >= MIN_TITLE_LEN
                && !matches!(line.to_lowercase().as_str(), "copy" | "amazon")
        })
        .map(str::to_owned)
}

/// Builds a competitor record from one raw card, falling back per field:
/// title → first plausible text line; ASIN → pattern scan over the card
/// text; link → synthesized from the marketplace domain. A card that
/// degrades everywhere still records whatever was extractable.
#[must_use]
pub fn build_record(seed: &Asin, card: &RawCard, domain: &str) -> CompetitorRecord {
    let title = card
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .or_else(|| first_non_asin_line(&card.text))
        .unwrap_or_default();

    let competitor_asin = card
        .asin
        .as_deref()
        .and_then(Asin::parse)
        .or_else(|| {
            asin_pattern()
                .find(&card.text)
                .and_then(|m| Asin::parse(m.as_str()))
        })
        .map(|a| a.as_str().to_owned())
        .unwrap_or_default();

    let product_link = card
        .link
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| {
            if competitor_asin.is_empty() || domain.is_empty() {
                String::new()
            } else {
                format!("https://{domain}/dp/{competitor_asin}")
            }
        });

    CompetitorRecord {
        seed_asin: seed.as_str().to_owned(),
        competitor_asin,
        title,
        marketplace_flag: card.marketplace_flag.clone().unwrap_or_default(),
        product_link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> Asin {
        Asin::parse("B0ABCDEFGH").unwrap()
    }

    #[test]
    fn structured_fields_pass_through() {
        let card = RawCard {
            text: String::new(),
            title: Some("Steel Bottle 1L".to_owned()),
            asin: Some("B0XYZ12345".to_owned()),
            link: Some("https://www.amazon.in/dp/B0XYZ12345".to_owned()),
            marketplace_flag: Some("IN".to_owned()),
        };
        let record = build_record(&seed(), &card, "amazon.in");
        assert_eq!(record.seed_asin, "B0ABCDEFGH");
        assert_eq!(record.competitor_asin, "B0XYZ12345");
        assert_eq!(record.title, "Steel Bottle 1L");
        assert_eq!(record.product_link, "https://www.amazon.in/dp/B0XYZ12345");
        assert_eq!(record.marketplace_flag, "IN");
    }

    #[test]
    fn missing_title_falls_back_to_card_text() {
        let card = RawCard {
            text: "B0XYZ12345\nCopy\nInsulated Steel Bottle\n4.4 stars".to_owned(),
            ..RawCard::default()
        };
        let record = build_record(&seed(), &card, "amazon.in");
        assert_eq!(record.title, "Insulated Steel Bottle");
    }

    #[test]
    fn missing_asin_falls_back_to_the_pattern_scan() {
        let card = RawCard {
            text: "Insulated Steel Bottle\nB0XYZ12345\nCopy".to_owned(),
            ..RawCard::default()
        };
        let record = build_record(&seed(), &card, "amazon.in");
        assert_eq!(record.competitor_asin, "B0XYZ12345");
    }

    #[test]
    fn missing_link_is_synthesized_from_the_domain() {
        let card = RawCard {
            text: "Insulated Steel Bottle B0XYZ12345".to_owned(),
            ..RawCard::default()
        };
        let record = build_record(&seed(), &card, "amazon.co.uk");
        assert_eq!(record.product_link, "https://amazon.co.uk/dp/B0XYZ12345");
    }

    #[test]
    fn fully_degraded_card_still_records_the_seed() {
        let card = RawCard {
            text: "•".to_owned(),
            ..RawCard::default()
        };
        let record = build_record(&seed(), &card, "amazon.in");
        assert_eq!(record.seed_asin, "B0ABCDEFGH");
        assert_eq!(record.competitor_asin, "");
        assert_eq!(record.title, "");
        assert_eq!(record.product_link, "");
    }

    #[test]
    fn first_non_asin_line_skips_ui_words_and_fragments() {
        let text = "copy\nAMZ\nB0XYZ12345 in cart\nActual Product Name Here";
        assert_eq!(
            first_non_asin_line(text).as_deref(),
            Some("Actual Product Name Here")
        );
    }

    #[test]
    fn first_non_asin_line_handles_empty_text() {
        assert_eq!(first_non_asin_line(""), None);
        assert_eq!(first_non_asin_line("\n\n"), None);
    }
}
