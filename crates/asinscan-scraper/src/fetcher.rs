//! Per-ASIN product fetch across an ordered marketplace list.
//!
//! Policy: first-found-wins across targets, bounded fixed-delay retries per
//! target (independent between targets), and never a hard failure — an ASIN
//! found nowhere becomes a synthetic NotFound row.

use asinscan_core::{Asin, Marketplace, MarketplaceTable, OfferRecord, ProductRecord};

use crate::client::RequestClient;
use crate::error::ScrapeError;
use crate::offers::parse_offers;
use crate::product::parse_product;
use crate::retry::retry_fixed_delay;

/// Result of one per-ASIN fetch. Both variants carry a full product row;
/// a missing product is data, not an error.
#[derive(Debug)]
pub enum FetchOutcome {
    Found {
        product: ProductRecord,
        offers: Vec<OfferRecord>,
    },
    NotFound(ProductRecord),
}

impl FetchOutcome {
    #[must_use]
    pub fn product(&self) -> &ProductRecord {
        match self {
            Self::Found { product, .. } | Self::NotFound(product) => product,
        }
    }
}

/// Orchestrates product and offer fetches for single ASINs.
pub struct ProductFetcher {
    client: RequestClient,
    targets: MarketplaceTable,
    max_retries: u32,
    retry_delay_secs: u64,
}

impl ProductFetcher {
    #[must_use]
    pub fn new(
        client: RequestClient,
        targets: MarketplaceTable,
        max_retries: u32,
        retry_delay_secs: u64,
    ) -> Self {
        Self {
            client,
            targets,
            max_retries,
            retry_delay_secs,
        }
    }

    /// Fetches one ASIN against every configured target in order.
    ///
    /// The first target that yields a parseable product short-circuits the
    /// rest. Each target gets its own retry budget. When every target is
    /// exhausted the outcome is the synthetic NotFound row.
    pub async fn fetch(&self, asin: &Asin) -> FetchOutcome {
        for target in self.targets.targets() {
            match self.fetch_from_target(target, asin).await {
                Ok(product) => {
                    tracing::info!(asin = %asin, marketplace = %target.name, "product found");
                    let offers = self.offers_for(target, asin).await;
                    return FetchOutcome::Found { product, offers };
                }
                Err(err) => {
                    tracing::warn!(
                        asin = %asin,
                        marketplace = %target.name,
                        error = %err,
                        "target exhausted — advancing to next marketplace"
                    );
                }
            }
        }

        tracing::warn!(asin = %asin, "not found on any marketplace — recording synthetic row");
        FetchOutcome::NotFound(ProductRecord::not_found(asin))
    }

    async fn fetch_from_target(
        &self,
        target: &Marketplace,
        asin: &Asin,
    ) -> Result<ProductRecord, ScrapeError> {
        let client = &self.client;
        retry_fixed_delay(self.max_retries, self.retry_delay_secs, || async move {
            let html = client.fetch_product_page(target, asin).await?;
            parse_product(&html, asin, &target.name).ok_or_else(|| ScrapeError::MissingTitle {
                url: format!("{}{}", target.product_url, asin),
            })
        })
        .await
    }

    /// Offers are best-effort enrichment: any failure degrades to an empty
    /// list rather than disturbing the product row.
    async fn offers_for(&self, target: &Marketplace, asin: &Asin) -> Vec<OfferRecord> {
        match self.client.fetch_offers_page(target, asin).await {
            Ok(html) => {
                let offers = parse_offers(&html, asin, &target.name);
                if !offers.is_empty() {
                    tracing::info!(
                        asin = %asin,
                        marketplace = %target.name,
                        count = offers.len(),
                        "third-party offers found"
                    );
                }
                offers
            }
            Err(err) => {
                tracing::warn!(asin = %asin, error = %err, "offer fetch failed — continuing without offers");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[path = "fetcher_test.rs"]
mod tests;
