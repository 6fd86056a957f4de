//! The per-identifier discovery state machine.
//!
//! Each identifier runs through `Reset → Submit → AwaitResults → Harvest →
//! PostReset` over one long-lived page. Recovery is two-tiered: a soft
//! in-page reset, then a hard reload that re-establishes marketplace state.
//! A failure confined to one identifier skips it; the loop always returns
//! whatever was accumulated.

use std::time::Duration;

use tokio::time::Instant;

use asinscan_core::{Asin, CompetitorRecord};

use crate::error::DiscoveryError;
use crate::harvest::build_record;
use crate::page::SearchPage;

/// Consecutive identical card counts required before results are considered
/// settled.
const STABLE_CHECKS: u32 = 3;
/// Consecutive no-growth scroll iterations before lazy loading is considered
/// drained.
const MAX_STALL_LOOPS: u32 = 10;

/// Wait bounds for the polling loops, injectable so tests run in
/// milliseconds.
#[derive(Debug, Clone)]
pub struct LoopTimings {
    /// Upper bound on one AwaitResults loop.
    pub result_timeout: Duration,
    /// Pause between polls while awaiting results.
    pub poll_interval: Duration,
    /// Pause after each reveal scroll, giving the lazy loader time to fire.
    pub scroll_settle: Duration,
}

impl Default for LoopTimings {
    fn default() -> Self {
        Self {
            result_timeout: Duration::from_secs(120),
            poll_interval: Duration::from_millis(700),
            scroll_settle: Duration::from_secs(1),
        }
    }
}

impl LoopTimings {
    #[must_use]
    pub fn with_result_timeout(timeout_secs: u64) -> Self {
        Self {
            result_timeout: Duration::from_secs(timeout_secs),
            ..Self::default()
        }
    }
}

/// Drives the search-and-harvest loop over a sequence of seed identifiers.
pub struct DiscoveryLoop<P> {
    page: P,
    /// Storefront domain used to synthesize product links for cards whose
    /// anchor is missing.
    domain: String,
    timings: LoopTimings,
}

enum AwaitVerdict {
    /// Loading finished, counts stable, page context matches.
    Settled,
    /// Timed out, but the page does talk about this identifier — harvest
    /// best-effort.
    BestEffort,
    /// Timed out on a page still showing foreign context.
    StaleContext,
}

impl<P: SearchPage> DiscoveryLoop<P> {
    pub fn new(page: P, domain: impl Into<String>, timings: LoopTimings) -> Self {
        Self {
            page,
            domain: domain.into(),
            timings,
        }
    }

    /// Processes every seed, isolating per-identifier failures, and returns
    /// the accumulated records (possibly empty).
    pub async fn run(&mut self, seeds: &[Asin]) -> Vec<CompetitorRecord> {
        let mut records = Vec::new();

        for (index, seed) in seeds.iter().enumerate() {
            tracing::info!(
                seed = %seed,
                position = index + 1,
                total = seeds.len(),
                "searching competitors"
            );
            match self.run_identifier(seed).await {
                Ok(found) => {
                    tracing::info!(seed = %seed, count = found.len(), "harvest complete");
                    records.extend(found);
                }
                Err(err) => {
                    tracing::warn!(seed = %seed, error = %err, "identifier skipped");
                }
            }
        }

        records
    }

    async fn run_identifier(&mut self, seed: &Asin) -> Result<Vec<CompetitorRecord>, DiscoveryError> {
        // Reset: soft first, hard reload as the guaranteed fallback.
        if let Err(err) = self.page.soft_reset().await {
            tracing::warn!(seed = %seed, error = %err, "soft reset failed — hard reloading");
            self.page.hard_reload().await?;
        }

        // Submit, with one hard-reload retry when the control is missing.
        if let Err(err) = self.page.submit_search(seed.as_str()).await {
            tracing::warn!(seed = %seed, error = %err, "submit failed — hard reloading once");
            self.page.hard_reload().await?;
            self.page.submit_search(seed.as_str()).await?;
        }

        // AwaitResults, with one hard-reload retry on stale context.
        match self.await_results(seed).await {
            AwaitVerdict::Settled => {}
            AwaitVerdict::BestEffort => {
                tracing::warn!(seed = %seed, "results never stabilized — harvesting best-effort");
            }
            AwaitVerdict::StaleContext => {
                tracing::warn!(seed = %seed, "page context is stale — hard reloading and retrying once");
                self.page.hard_reload().await?;
                self.page.submit_search(seed.as_str()).await?;
                match self.await_results(seed).await {
                    AwaitVerdict::Settled | AwaitVerdict::BestEffort => {}
                    AwaitVerdict::StaleContext => {
                        return Err(DiscoveryError::ResultsTimeout {
                            asin: seed.as_str().to_owned(),
                            waited_secs: self.timings.result_timeout.as_secs(),
                        });
                    }
                }
            }
        }

        let records = self.harvest(seed).await?;

        // PostReset: proactively clear state so the next iteration starts
        // clean even if its own reset path degrades.
        if let Err(err) = self.page.soft_reset().await {
            tracing::debug!(seed = %seed, error = %err, "post-harvest soft reset failed");
        }

        Ok(records)
    }

    /// Polls until the loading indicator clears, the card count holds for
    /// [`STABLE_CHECKS`] consecutive polls, and the page context mentions
    /// the identifier — the guard against the previous iteration's results
    /// bleeding through.
    async fn await_results(&mut self, seed: &Asin) -> AwaitVerdict {
        let deadline = Instant::now() + self.timings.result_timeout;
        let mut last_count = 0usize;
        let mut stable = 0u32;

        while Instant::now() < deadline {
            if self.page.loading_indicator_visible().await {
                tokio::time::sleep(self.timings.poll_interval).await;
                continue;
            }

            let count = self.page.card_count().await;
            if count > 0 {
                if count == last_count {
                    stable += 1;
                } else {
                    stable = 0;
                    last_count = count;
                }

                if stable >= STABLE_CHECKS && self.page.page_contains(seed.as_str()).await {
                    return AwaitVerdict::Settled;
                }
            }

            tokio::time::sleep(self.timings.poll_interval).await;
        }

        if self.page.page_contains(seed.as_str()).await {
            AwaitVerdict::BestEffort
        } else {
            AwaitVerdict::StaleContext
        }
    }

    /// Scrolls until the visible card count stops growing, then extracts one
    /// record per card.
    async fn harvest(&mut self, seed: &Asin) -> Result<Vec<CompetitorRecord>, DiscoveryError> {
        let mut prev_count = 0usize;
        let mut stalls = 0u32;

        while stalls < MAX_STALL_LOOPS {
            let count = self.page.card_count().await;
            if count == prev_count {
                stalls += 1;
            } else {
                stalls = 0;
                prev_count = count;
            }
            self.page.reveal_more().await;
            tokio::time::sleep(self.timings.scroll_settle).await;
        }

        let cards = self.page.harvest_cards().await?;
        Ok(cards
            .iter()
            .map(|card| build_record(seed, card, &self.domain))
            .collect())
    }

    /// Releases the page provider (used by callers that need the session
    /// back, e.g. to close it).
    pub fn into_page(self) -> P {
        self.page
    }
}

#[cfg(test)]
#[path = "machine_test.rs"]
mod tests;
