use std::ops::Range;

/// Runtime configuration for a scraping run, resolved from the environment.
#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Per-request timeout for storefront fetches.
    pub request_timeout_secs: u64,
    /// Retry attempts per marketplace target after the first failure.
    pub max_retries: u32,
    /// Fixed delay between retries on one target.
    pub retry_delay_secs: u64,
    /// Jittered pause before each storefront request, sampled uniformly.
    pub request_delay_ms: Range<u64>,
    /// WebDriver endpoint the discovery session connects to.
    pub webdriver_url: String,
    /// Base URL of the competitor-discovery portal.
    pub portal_url: String,
    /// Upper bound on one AwaitResults polling loop.
    pub discovery_result_timeout_secs: u64,
    /// Upper bound on individual element waits inside the portal UI.
    pub discovery_wait_timeout_secs: u64,
    /// Portal account email; required only when a discovery session starts.
    pub portal_email: Option<String>,
    /// Portal account password; required only when a discovery session starts.
    pub portal_password: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_secs", &self.retry_delay_secs)
            .field("request_delay_ms", &self.request_delay_ms)
            .field("webdriver_url", &self.webdriver_url)
            .field("portal_url", &self.portal_url)
            .field(
                "discovery_result_timeout_secs",
                &self.discovery_result_timeout_secs,
            )
            .field(
                "discovery_wait_timeout_secs",
                &self.discovery_wait_timeout_secs,
            )
            .field("portal_email", &self.portal_email.as_ref().map(|_| "[redacted]"))
            .field(
                "portal_password",
                &self.portal_password.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
