//! HTTP client for storefront product and offer-listing pages.
//!
//! Owns its own `reqwest::Client` (cookies, gzip, timeouts) and a pool of
//! browser User-Agent strings; every request draws a fresh UA and a
//! browser-shaped header set, and waits a jittered delay first so request
//! timing does not look mechanical to anti-automation defenses.

use std::ops::Range;
use std::time::Duration;

use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;

use asinscan_core::{Asin, Marketplace};

use crate::error::ScrapeError;

const USER_AGENTS: [&str; 5] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
];

/// HTTP client for product-page and offer-listing fetches.
pub struct RequestClient {
    client: Client,
    delay_ms: Range<u64>,
}

impl RequestClient {
    /// Creates a client with the configured timeout and pacing range.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, delay_ms: Range<u64>) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .cookie_store(true)
            .gzip(true)
            .build()?;
        Ok(Self { client, delay_ms })
    }

    /// Fetches the product page for `asin` on one marketplace.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::Http`] on transport failure, [`ScrapeError::Status`]
    /// on any non-2xx response. Both are transient from the fetcher's point
    /// of view.
    pub async fn fetch_product_page(
        &self,
        marketplace: &Marketplace,
        asin: &Asin,
    ) -> Result<String, ScrapeError> {
        let url = format!("{}{}", marketplace.product_url, asin);
        self.paced_get(&url, browser_headers(marketplace.origin()))
            .await
    }

    /// Fetches the offer-listing document for a found product.
    ///
    /// The endpoint expects an XHR-shaped request with the product page as
    /// referer.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::fetch_product_page`]; callers degrade
    /// them to an empty offer list.
    pub async fn fetch_offers_page(
        &self,
        marketplace: &Marketplace,
        asin: &Asin,
    ) -> Result<String, ScrapeError> {
        let url = format!(
            "{}/gp/aod/ajax/ref=dp_aod_NEW_mbc?asin={}",
            marketplace.origin(),
            asin
        );
        let referer = format!("{}{}", marketplace.product_url, asin);
        let mut headers = browser_headers(&referer);
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        self.paced_get(&url, headers).await
    }

    async fn paced_get(&self, url: &str, headers: HeaderMap) -> Result<String, ScrapeError> {
        let delay = rand::rng().random_range(self.delay_ms.clone());
        tokio::time::sleep(Duration::from_millis(delay)).await;

        let response = self.client.get(url).headers(headers).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response.text().await?)
    }
}

/// A browser-shaped header set with a randomly drawn User-Agent.
fn browser_headers(referer: &str) -> HeaderMap {
    let ua = USER_AGENTS[rand::rng().random_range(0..USER_AGENTS.len())];

    let mut headers = HeaderMap::new();
    headers.insert(reqwest::header::USER_AGENT, HeaderValue::from_static(ua));
    headers.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        reqwest::header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert("DNT", HeaderValue::from_static("1"));
    headers.insert(
        reqwest::header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers.insert("Sec-Fetch-Dest", HeaderValue::from_static("document"));
    headers.insert("Sec-Fetch-Mode", HeaderValue::from_static("navigate"));
    headers.insert("Sec-Fetch-Site", HeaderValue::from_static("none"));
    headers.insert(
        reqwest::header::CACHE_CONTROL,
        HeaderValue::from_static("max-age=0"),
    );
    if let Ok(value) = HeaderValue::from_str(referer) {
        headers.insert(reqwest::header::REFERER, value);
    }
    headers
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
