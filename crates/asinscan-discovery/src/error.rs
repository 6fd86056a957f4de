use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error(
        "portal credentials not found — set ASINSCAN_PORTAL_EMAIL and ASINSCAN_PORTAL_PASSWORD"
    )]
    MissingCredentials,

    #[error("WebDriver session could not be created: {0}")]
    NewSession(#[from] fantoccini::error::NewSessionError),

    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    #[error("portal login failed: {reason}")]
    LoginFailed { reason: String },

    #[error("marketplace option for www.{domain} never appeared")]
    MarketplaceSelection { domain: String },

    #[error("search control not found for {asin}")]
    SearchControlMissing { asin: String },

    #[error("results for {asin} did not stabilize within {waited_secs}s")]
    ResultsTimeout { asin: String, waited_secs: u64 },
}
