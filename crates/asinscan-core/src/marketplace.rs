//! Marketplace targets and alias resolution.
//!
//! Two tables exist because the two pipelines address marketplaces
//! differently: product fetches need a `/dp/` URL base per storefront, while
//! the competitor-discovery portal selects marketplaces by bare domain in its
//! dropdown (and supports more of them).

/// One configured marketplace endpoint attempted during product fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marketplace {
    /// Display name used in output rows, e.g. `"Amazon India"`.
    pub name: String,
    /// Product-page URL base ending in `/dp/`; the ASIN is appended directly.
    pub product_url: String,
}

impl Marketplace {
    fn new(name: &str, product_url: &str) -> Self {
        Self {
            name: name.to_owned(),
            product_url: product_url.to_owned(),
        }
    }

    /// Origin of the storefront (scheme + host), for building secondary
    /// endpoints and referers.
    #[must_use]
    pub fn origin(&self) -> &str {
        self.product_url
            .split_once("/dp/")
            .map_or(self.product_url.as_str(), |(origin, _)| origin)
    }
}

/// The ordered set of product marketplaces for a run.
///
/// Injected into the fetcher rather than read from a global so tests can
/// point the table at a local server.
#[derive(Debug, Clone)]
pub struct MarketplaceTable {
    targets: Vec<Marketplace>,
}

impl MarketplaceTable {
    /// The built-in storefront table, in default fetch order.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            targets: vec![
                Marketplace::new("Amazon India", "https://www.amazon.in/dp/"),
                Marketplace::new("Amazon USA", "https://www.amazon.com/dp/"),
                Marketplace::new("Amazon SG", "https://www.amazon.sg/dp/"),
                Marketplace::new("Amazon AE", "https://www.amazon.ae/dp/"),
                Marketplace::new("Amazon UK", "https://www.amazon.co.uk/dp/"),
            ],
        }
    }

    /// Builds a table from explicit targets (used by tests and callers that
    /// restrict the run to one marketplace).
    #[must_use]
    pub fn from_targets(targets: Vec<Marketplace>) -> Self {
        Self { targets }
    }

    #[must_use]
    pub fn targets(&self) -> &[Marketplace] {
        &self.targets
    }

    /// Resolves a user-supplied alias (case-insensitive) to one marketplace.
    ///
    /// Returns `None` for an empty or unrecognized alias; callers treat that
    /// as "try every target in table order".
    #[must_use]
    pub fn resolve(&self, alias: &str) -> Option<&Marketplace> {
        let name = product_alias_to_name(alias)?;
        self.targets.iter().find(|m| m.name == name)
    }
}

fn product_alias_to_name(alias: &str) -> Option<&'static str> {
    let key = alias.trim().to_lowercase();
    let name = match key.as_str() {
        "india" | "in" => "Amazon India",
        "us" | "usa" | "united states" | "america" => "Amazon USA",
        "sg" | "singapore" => "Amazon SG",
        "ae" | "uae" | "united arab emirates" => "Amazon AE",
        "uk" | "gb" | "great britain" | "united kingdom" => "Amazon UK",
        _ => return None,
    };
    Some(name)
}

/// Resolves a user-supplied alias to the bare storefront domain used by the
/// discovery portal's marketplace dropdown.
///
/// The dropdown covers more regions than the product table, so this is a
/// separate mapping. An unrecognized alias is returned trimmed and unchanged
/// — the portal may still accept a literal domain.
#[must_use]
pub fn discovery_domain(alias: &str) -> String {
    let key = alias.trim().to_lowercase();
    let domain = match key.as_str() {
        "india" | "in" => "amazon.in",
        "us" | "usa" | "america" => "amazon.com",
        "uk" | "united kingdom" => "amazon.co.uk",
        "de" | "germany" => "amazon.de",
        "fr" | "france" => "amazon.fr",
        "it" | "italy" => "amazon.it",
        "es" | "spain" => "amazon.es",
        "ca" | "canada" => "amazon.ca",
        "mx" | "mexico" => "amazon.com.mx",
        "nl" | "netherlands" => "amazon.nl",
        "jp" | "japan" => "amazon.co.jp",
        "au" | "australia" => "amazon.com.au",
        "ae" | "uae" => "amazon.ae",
        "br" | "brazil" => "amazon.com.br",
        "sa" | "saudi" => "amazon.sa",
        _ => return alias.trim().to_owned(),
    };
    domain.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_ordered() {
        let table = MarketplaceTable::builtin();
        let names: Vec<&str> = table.targets().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Amazon India", "Amazon USA", "Amazon SG", "Amazon AE", "Amazon UK"]
        );
    }

    #[test]
    fn resolves_aliases_case_insensitively() {
        let table = MarketplaceTable::builtin();
        assert_eq!(table.resolve("India").unwrap().name, "Amazon India");
        assert_eq!(table.resolve("USA").unwrap().name, "Amazon USA");
        assert_eq!(table.resolve("  United Kingdom ").unwrap().name, "Amazon UK");
    }

    #[test]
    fn unrecognized_alias_resolves_to_none() {
        let table = MarketplaceTable::builtin();
        assert_eq!(table.resolve("mars"), None);
        assert_eq!(table.resolve(""), None);
    }

    #[test]
    fn origin_strips_the_dp_suffix() {
        let table = MarketplaceTable::builtin();
        let india = table.resolve("in").unwrap();
        assert_eq!(india.origin(), "https://www.amazon.in");
    }

    #[test]
    fn discovery_domain_maps_known_aliases() {
        assert_eq!(discovery_domain("japan"), "amazon.co.jp");
        assert_eq!(discovery_domain("US"), "amazon.com");
    }

    #[test]
    fn discovery_domain_passes_through_unknown_input() {
        assert_eq!(discovery_domain("amazon.pl"), "amazon.pl");
    }
}
