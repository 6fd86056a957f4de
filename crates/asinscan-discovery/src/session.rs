//! The live WebDriver-backed portal session.
//!
//! Owns the browser for the whole run: login, marketplace selection, and the
//! [`SearchPage`] operations the state machine drives. Selector routes here
//! mirror the portal's current markup; every structured lookup has a
//! scripted or text fallback because the class names are build artifacts.

use std::time::Duration;

use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::key::Key;
use fantoccini::{Client, ClientBuilder, Locator};

use asinscan_core::AppConfig;

use crate::error::DiscoveryError;
use crate::page::{RawCard, SearchPage};

/// The search tool lives under this path on the portal.
const SEARCH_PATH: &str = "/cerebro";

/// The identifier input, across known placeholder variants.
const INPUT_XPATH: &str = "//input[contains(@placeholder,'Enter up to 10 product identifiers')] \
     | //input[contains(@placeholder,'Enter up to 10 product identifiers for keyword comparison')] \
     | //input[contains(@placeholder,'Enter') and @type='text']";

/// One competitor result card. Obfuscated-class route with no stable
/// test id available.
const CARD_XPATH: &str = "//div[contains(@class,'sc-hlqirL') and contains(@class,'sc-bZTyFN')]";

/// Marker visible once the member dashboard has loaded.
const DASHBOARD_XPATH: &str = "//div[contains(text(), 'Tools') or contains(text(), 'Dashboard')]";

/// Visible-loader probe run in the page; covers the generic spinner
/// vocabulary the portal cycles through.
const LOADING_JS: &str = r#"
    const sel = [
      '[data-testid="loading"]','[data-testid="spinner"]','[aria-busy="true"]',
      '.loading','.is-loading','.spinner','.progress',
      'div[class*="Loader"]','div[class*="loader"]','div[role="progressbar"]'
    ];
    for (const s of sel) {
        const el = document.querySelector(s);
        if (el && el.offsetParent !== null) return true;
    }
    return false;
"#;

const CONTAINS_JS: &str =
    "return (document.body && document.body.innerText || '').indexOf(arguments[0]) !== -1;";

/// A logged-in portal session bound to one marketplace.
pub struct DiscoverySession {
    client: Client,
    search_url: String,
    domain: String,
    wait_timeout: Duration,
}

impl DiscoverySession {
    /// Connects to the WebDriver endpoint, logs into the portal, and selects
    /// the marketplace. Everything here is session-fatal: no credentials, a
    /// failed login, or a dropdown that never appears abort the run.
    ///
    /// # Errors
    ///
    /// [`DiscoveryError::MissingCredentials`] before any connection is made;
    /// [`DiscoveryError::NewSession`], [`DiscoveryError::LoginFailed`], or
    /// [`DiscoveryError::MarketplaceSelection`] afterwards.
    pub async fn connect(config: &AppConfig, domain: &str) -> Result<Self, DiscoveryError> {
        let (Some(email), Some(password)) = (&config.portal_email, &config.portal_password) else {
            return Err(DiscoveryError::MissingCredentials);
        };

        let client = ClientBuilder::native()
            .connect(&config.webdriver_url)
            .await?;

        let mut session = Self {
            client,
            search_url: format!("{}{SEARCH_PATH}", config.portal_url.trim_end_matches('/')),
            domain: domain.to_owned(),
            wait_timeout: Duration::from_secs(config.discovery_wait_timeout_secs),
        };

        session
            .login(&config.portal_url, email, password)
            .await
            .inspect_err(|err| tracing::error!(error = %err, "portal login failed"))?;

        session.open_search().await?;
        Ok(session)
    }

    /// Closes the browser session.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::WebDriver`] if the session teardown fails.
    pub async fn close(self) -> Result<(), DiscoveryError> {
        self.client.close().await?;
        Ok(())
    }

    async fn login(
        &mut self,
        portal_url: &str,
        email: &str,
        password: &str,
    ) -> Result<(), DiscoveryError> {
        let signin_url = format!("{}/user/signin", portal_url.trim_end_matches('/'));
        self.client.goto(&signin_url).await?;

        let current = self.client.current_url().await?;
        if current.as_str().to_lowercase().contains("signin") {
            tracing::info!("signing in with configured credentials");
            self.fill_login_form(email, password).await?;
        } else {
            tracing::info!("session already logged in via persistent profile");
        }

        // Captcha and verification pages need a human; wait a bounded extra
        // window for manual resolution before giving up.
        let source = self.client.source().await?;
        if source.to_lowercase().contains("captcha") {
            tracing::warn!("captcha detected — waiting up to 2 minutes for manual solve");
            self.await_dashboard(Duration::from_secs(120)).await?;
        } else if self
            .client
            .current_url()
            .await?
            .as_str()
            .to_lowercase()
            .contains("verify")
        {
            tracing::warn!("verification step detected — waiting up to 3 minutes for manual completion");
            self.await_dashboard(Duration::from_secs(180)).await?;
        }

        self.await_dashboard(self.wait_timeout).await?;
        tracing::info!("portal login confirmed");
        Ok(())
    }

    async fn fill_login_form(&mut self, email: &str, password: &str) -> Result<(), DiscoveryError> {
        let email_input = self
            .wait_for(Locator::Id("loginform-email"))
            .await
            .map_err(|_| DiscoveryError::LoginFailed {
                reason: "email field never appeared".to_owned(),
            })?;
        email_input.clear().await?;
        email_input.send_keys(email).await?;

        let password_input = self
            .wait_for(Locator::Id("loginform-password"))
            .await
            .map_err(|_| DiscoveryError::LoginFailed {
                reason: "password field never appeared".to_owned(),
            })?;
        password_input.clear().await?;
        password_input.send_keys(password).await?;

        let login_button = self
            .wait_for(Locator::XPath("//button[normalize-space(text())='Log In']"))
            .await
            .map_err(|_| DiscoveryError::LoginFailed {
                reason: "login button never appeared".to_owned(),
            })?;
        self.scripted_click(&login_button).await?;
        Ok(())
    }

    async fn await_dashboard(&mut self, timeout: Duration) -> Result<(), DiscoveryError> {
        self.client
            .wait()
            .at_most(timeout)
            .for_element(Locator::XPath(DASHBOARD_XPATH))
            .await
            .map_err(|_| DiscoveryError::LoginFailed {
                reason: "dashboard never appeared after sign-in".to_owned(),
            })?;
        Ok(())
    }

    async fn open_search(&mut self) -> Result<(), DiscoveryError> {
        tracing::info!(url = %self.search_url, "opening search tool");
        if self.client.goto(&self.search_url).await.is_err() {
            tracing::warn!("search tool load timed out — refreshing");
            self.client.refresh().await?;
        }
        self.select_marketplace().await
    }

    /// Opens the marketplace dropdown next to the identifier input and picks
    /// the configured domain. The dropdown trigger has no stable class, only
    /// a `data-open` attribute.
    async fn select_marketplace(&mut self) -> Result<(), DiscoveryError> {
        let domain = self.domain.clone();
        let input = self.wait_for(Locator::XPath(INPUT_XPATH)).await.map_err(|_| {
            DiscoveryError::MarketplaceSelection {
                domain: domain.clone(),
            }
        })?;
        self.scroll_into_view(&input).await?;

        // Already open from a previous pass?
        let option_xpath = "//div[@role='option' and contains(., 'amazon.')]";
        if self
            .client
            .find_all(Locator::XPath(option_xpath))
            .await
            .map(|opts| opts.is_empty())
            .unwrap_or(true)
        {
            let triggers = self
                .client
                .find_all(Locator::Css("span[data-open], div[data-open]"))
                .await?;
            let mut opened = false;
            for trigger in triggers {
                if !trigger.is_displayed().await.unwrap_or(false) {
                    continue;
                }
                self.scroll_into_view(&trigger).await?;
                if self.scripted_click(&trigger).await.is_ok()
                    && self
                        .client
                        .wait()
                        .at_most(self.wait_timeout)
                        .for_element(Locator::XPath(option_xpath))
                        .await
                        .is_ok()
                {
                    opened = true;
                    break;
                }
            }
            if !opened {
                return Err(DiscoveryError::MarketplaceSelection {
                    domain: domain.clone(),
                });
            }
        }

        let option_for_domain =
            format!("//div[@role='option' and contains(., 'www.{domain}')]");
        let option = self
            .wait_for(Locator::XPath(&option_for_domain))
            .await
            .map_err(|_| DiscoveryError::MarketplaceSelection {
                domain: domain.clone(),
            })?;
        self.scroll_into_view(&option).await?;
        option.click().await?;
        tracing::info!(domain = %domain, "marketplace selected");
        Ok(())
    }

    async fn wait_for(&self, locator: Locator<'_>) -> Result<Element, CmdError> {
        self.client
            .wait()
            .at_most(self.wait_timeout)
            .for_element(locator)
            .await
    }

    /// Click through script — the portal overlays elements often enough
    /// that a native click is the less reliable path.
    async fn scripted_click(&self, element: &Element) -> Result<(), CmdError> {
        let arg = serde_json::to_value(element)?;
        self.client
            .execute("arguments[0].click();", vec![arg])
            .await?;
        Ok(())
    }

    async fn scroll_into_view(&self, element: &Element) -> Result<(), CmdError> {
        let arg = serde_json::to_value(element)?;
        self.client
            .execute("arguments[0].scrollIntoView({block:'center'});", vec![arg])
            .await?;
        Ok(())
    }

    async fn find_input(&self) -> Result<Element, CmdError> {
        self.wait_for(Locator::XPath(INPUT_XPATH)).await
    }

    async fn card_elements(&self) -> Vec<Element> {
        self.client
            .find_all(Locator::XPath(CARD_XPATH))
            .await
            .unwrap_or_default()
    }
}

impl SearchPage for DiscoverySession {
    /// In-page cleanup: scroll top, clear the input with keyboard events
    /// (the input is a controlled component and only registers key input),
    /// remove selection chips, and click any Clear/Reset control.
    async fn soft_reset(&mut self) -> Result<(), DiscoveryError> {
        self.client.execute("window.scrollTo(0, 0);", vec![]).await?;

        let input = self.find_input().await?;
        let select_all: String = vec![char::from(Key::Control), 'a', char::from(Key::Null)]
            .into_iter()
            .collect();
        input.send_keys(&select_all).await?;
        input.send_keys(&String::from(char::from(Key::Delete))).await?;

        // Selection chips and clear buttons, across markup variants. All
        // best-effort: a missing control is not a failed reset.
        for xpath in [
            "//button[contains(@aria-label, 'Remove') or contains(@aria-label, 'remove')]",
            "//div[contains(@class,'chip') or contains(@class,'tag')]//button",
            "//button[normalize-space()='Clear']",
            "//button[normalize-space()='Reset']",
            "//button[contains(., 'New Search')]",
            "//button[contains(@data-testid,'clear')]",
        ] {
            let Ok(buttons) = self.client.find_all(Locator::XPath(xpath)).await else {
                continue;
            };
            for button in buttons {
                if button.is_displayed().await.unwrap_or(false) {
                    let _ = self.scripted_click(&button).await;
                }
            }
        }

        // Best-effort wait for stale cards to vanish.
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while tokio::time::Instant::now() < deadline {
            if self.card_elements().await.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(250)).await;
        }

        tracing::debug!("soft reset completed");
        Ok(())
    }

    /// Full reload with a cache-busting nonce, then marketplace
    /// re-selection — guarantees a clean slate at the cost of a page load.
    async fn hard_reload(&mut self) -> Result<(), DiscoveryError> {
        tracing::info!("hard reload for a clean page state");
        let nonce: u64 = rand::random();
        let url = format!("{}?r={nonce}", self.search_url);
        if self.client.goto(&url).await.is_err() {
            self.client.refresh().await?;
        }
        self.select_marketplace().await
    }

    async fn submit_search(&mut self, asin: &str) -> Result<(), DiscoveryError> {
        let input = self
            .find_input()
            .await
            .map_err(|_| DiscoveryError::SearchControlMissing {
                asin: asin.to_owned(),
            })?;
        self.scroll_into_view(&input).await?;

        // Keyboard entry so the controlled input registers the value.
        input.send_keys(asin).await?;
        input
            .send_keys(&String::from(char::from(Key::Enter)))
            .await?;
        tokio::time::sleep(Duration::from_millis(600)).await;

        let button = self
            .wait_for(Locator::Css("button[data-testid='getcompetitors']"))
            .await
            .map_err(|_| DiscoveryError::SearchControlMissing {
                asin: asin.to_owned(),
            })?;
        self.scroll_into_view(&button).await?;
        self.scripted_click(&button).await?;
        tracing::debug!(asin, "search submitted");
        Ok(())
    }

    async fn loading_indicator_visible(&mut self) -> bool {
        match self.client.execute(LOADING_JS, vec![]).await {
            Ok(value) => value.as_bool().unwrap_or(false),
            Err(_) => false,
        }
    }

    async fn card_count(&mut self) -> usize {
        self.card_elements().await.len()
    }

    async fn page_contains(&mut self, needle: &str) -> bool {
        match self
            .client
            .execute(CONTAINS_JS, vec![serde_json::Value::String(needle.to_owned())])
            .await
        {
            Ok(value) => value.as_bool().unwrap_or(false),
            // Assume a match on script failure: harvesting best-effort beats
            // reloading a page we cannot even probe.
            Err(_) => true,
        }
    }

    async fn reveal_more(&mut self) {
        let cards = self.card_elements().await;
        if let Some(last) = cards.last() {
            let _ = self.scroll_into_view(last).await;
        }
        let _ = self
            .client
            .execute("window.scrollBy(0, 250);", vec![])
            .await;
    }

    async fn harvest_cards(&mut self) -> Result<Vec<RawCard>, DiscoveryError> {
        let mut cards = Vec::new();
        for element in self.card_elements().await {
            cards.push(raw_card_from(&element).await);
        }
        Ok(cards)
    }
}

/// Pulls the structured fields off one card element; every miss becomes a
/// `None` for the fallback ladder in [`crate::harvest`].
async fn raw_card_from(element: &Element) -> RawCard {
    let text = element.text().await.unwrap_or_default();

    let title = match element
        .find(Locator::XPath(".//div[contains(@class,'sc-eAuMPQ')]"))
        .await
    {
        Ok(el) => el.text().await.ok().map(|t| t.trim().to_owned()),
        Err(_) => None,
    };

    let asin = match element
        .find(Locator::XPath(".//span[contains(@class,'sc-MHjuz')]"))
        .await
    {
        Ok(el) => el.text().await.ok().map(|t| t.trim().to_owned()),
        Err(_) => None,
    };

    let link = match element
        .find(Locator::XPath(".//a[contains(@class,'sc-hbaYEB')]"))
        .await
    {
        Ok(el) => el.attr("href").await.ok().flatten(),
        Err(_) => None,
    };

    let marketplace_flag = match element
        .find(Locator::XPath(".//span[contains(@class,'sc-hiTDLB')]"))
        .await
    {
        Ok(el) => el.text().await.ok().map(|t| t.trim().to_owned()),
        Err(_) => None,
    };

    RawCard {
        text,
        title,
        asin,
        link,
        marketplace_flag,
    }
}
