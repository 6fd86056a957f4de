//! Mapping from discovered competitor ASINs back to the seed that found them.

use std::collections::HashMap;

use crate::asin::Asin;
use crate::records::CompetitorRecord;

/// Competitor→seed lookup built once per run, after discovery completes and
/// before any product fetch begins.
///
/// Seeds map to themselves; a discovered ASIN maps to the seed whose search
/// surfaced it first. ASINs unrelated to the run resolve to nothing.
#[derive(Debug, Default, Clone)]
pub struct SearchSeedMap {
    map: HashMap<Asin, Asin>,
}

impl SearchSeedMap {
    #[must_use]
    pub fn build(seeds: &[Asin], competitors: &[CompetitorRecord]) -> Self {
        let mut map = HashMap::new();
        for seed in seeds {
            map.insert(seed.clone(), seed.clone());
        }
        for record in competitors {
            let (Some(competitor), Some(seed)) = (
                Asin::parse(&record.competitor_asin),
                Asin::parse(&record.seed_asin),
            ) else {
                continue;
            };
            // First mapping wins when two seeds surface the same competitor.
            map.entry(competitor).or_insert(seed);
        }
        Self { map }
    }

    /// The seed annotation for `asin`, if it belongs to this run.
    #[must_use]
    pub fn seed_for(&self, asin: &Asin) -> Option<&Asin> {
        self.map.get(asin)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
