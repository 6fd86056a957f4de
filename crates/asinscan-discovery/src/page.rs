//! The page-state seam between the discovery state machine and the browser.
//!
//! The machine never talks to the WebDriver directly; it drives a
//! [`SearchPage`]. The live implementation sits on a fantoccini session
//! ([`crate::session::DiscoverySession`]); tests drive the machine with a
//! scripted fake.

use crate::error::DiscoveryError;

/// One result card as pulled from the page, before any fallback extraction.
///
/// Structured fields are `None` whenever the corresponding node is missing —
/// result-card class names are build artifacts and disappear without notice,
/// so [`crate::harvest`] reconstructs missing fields from `text`.
#[derive(Debug, Clone, Default)]
pub struct RawCard {
    /// Full visible text of the card.
    pub text: String,
    pub title: Option<String>,
    pub asin: Option<String>,
    pub link: Option<String>,
    pub marketplace_flag: Option<String>,
}

/// Operations the per-identifier state machine needs from the search page.
pub trait SearchPage {
    /// Clears the input and any selection chips in place. An error means the
    /// soft path failed and the caller should hard-reload.
    async fn soft_reset(&mut self) -> Result<(), DiscoveryError>;

    /// Full page reload plus marketplace re-selection — the
    /// guaranteed-correctness recovery path.
    async fn hard_reload(&mut self) -> Result<(), DiscoveryError>;

    /// Types the identifier and triggers the search action.
    ///
    /// Returns [`DiscoveryError::SearchControlMissing`] when the search
    /// control cannot be located.
    async fn submit_search(&mut self, asin: &str) -> Result<(), DiscoveryError>;

    /// Whether a loading indicator is currently visible.
    async fn loading_indicator_visible(&mut self) -> bool;

    /// Number of result cards currently in the DOM.
    async fn card_count(&mut self) -> usize;

    /// Whether the page text contains `needle` — the guard against results
    /// from the previous iteration bleeding through.
    async fn page_contains(&mut self, needle: &str) -> bool;

    /// Scrolls to reveal more lazily-loaded cards.
    async fn reveal_more(&mut self);

    /// Pulls every visible result card.
    async fn harvest_cards(&mut self) -> Result<Vec<RawCard>, DiscoveryError>;
}
