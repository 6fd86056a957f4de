//! ASIN validation and list handling.
//!
//! An ASIN is the join key across every table this system produces. Only
//! canonical ASINs (`B0` + 8 uppercase alphanumerics) are ever admitted into
//! a working set; malformed tokens are dropped at the boundary rather than
//! propagated as errors.

use serde::{Deserialize, Serialize};

/// A validated, canonical (uppercase) Amazon product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asin(String);

impl Asin {
    /// Length of a canonical ASIN: the `B0` prefix plus eight alphanumerics.
    pub const LEN: usize = 10;

    /// Parses a raw token into a canonical ASIN.
    ///
    /// Trims surrounding whitespace and uppercases before validating.
    /// Returns `None` for anything that does not match the fixed pattern —
    /// parsing never fails loudly.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let token = raw.trim().to_ascii_uppercase();
        if token.len() != Self::LEN {
            return None;
        }
        let bytes = token.as_bytes();
        if bytes[0] != b'B' || bytes[1] != b'0' {
            return None;
        }
        if !bytes[2..]
            .iter()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
        {
            return None;
        }
        Some(Self(token))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Asin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Asin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Splits raw user input (comma- and/or whitespace-separated) into a list of
/// valid ASINs, dropping malformed tokens and duplicates. First-seen order is
/// preserved.
#[must_use]
pub fn parse_list(raw: &str) -> Vec<Asin> {
    let tokens = raw
        .replace(',', " ")
        .split_whitespace()
        .filter_map(Asin::parse)
        .collect();
    dedupe(tokens)
}

/// Removes exact duplicates while preserving first-seen order.
#[must_use]
pub fn dedupe(asins: Vec<Asin>) -> Vec<Asin> {
    let mut seen = std::collections::HashSet::new();
    asins.into_iter().filter(|a| seen.insert(a.clone())).collect()
}

/// Sorted unique union of seed and discovered identifier sets.
///
/// Used to build the superset of ASINs to fetch products for after
/// competitor discovery has run.
#[must_use]
pub fn union(seeds: &[Asin], discovered: &[Asin]) -> Vec<Asin> {
    let mut set: std::collections::BTreeSet<Asin> = seeds.iter().cloned().collect();
    set.extend(discovered.iter().cloned());
    set.into_iter().collect()
}

#[cfg(test)]
#[path = "asin_test.rs"]
mod tests;
