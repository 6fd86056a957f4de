use std::collections::VecDeque;
use std::time::Duration;

use super::*;
use crate::page::{RawCard, SearchPage};

fn seed(s: &str) -> Asin {
    Asin::parse(s).unwrap()
}

fn fast_timings() -> LoopTimings {
    LoopTimings {
        result_timeout: Duration::from_millis(200),
        poll_interval: Duration::from_millis(1),
        scroll_settle: Duration::from_millis(1),
    }
}

fn webdriver_err() -> DiscoveryError {
    DiscoveryError::WebDriver(fantoccini::error::CmdError::NotW3C(serde_json::Value::Null))
}

/// Scripted page: counts play out of a queue (then hold at `final_count`),
/// loading shows for `loading_ticks` polls, submits fail `submit_misses`
/// times, and the context guard can be gated on a hard reload having
/// happened.
#[derive(Default)]
struct MockPage {
    soft_reset_fails_first: bool,
    soft_resets: u32,
    hard_reloads: u32,
    submit_misses: u32,
    submits: Vec<String>,
    loading_ticks: u32,
    counts: VecDeque<usize>,
    final_count: usize,
    contains: bool,
    contains_requires_reload: bool,
    cards: Vec<RawCard>,
    harvests: u32,
}

impl SearchPage for MockPage {
    async fn soft_reset(&mut self) -> Result<(), DiscoveryError> {
        self.soft_resets += 1;
        if self.soft_reset_fails_first && self.soft_resets == 1 {
            return Err(webdriver_err());
        }
        Ok(())
    }

    async fn hard_reload(&mut self) -> Result<(), DiscoveryError> {
        self.hard_reloads += 1;
        Ok(())
    }

    async fn submit_search(&mut self, asin: &str) -> Result<(), DiscoveryError> {
        if self.submit_misses > 0 {
            self.submit_misses -= 1;
            return Err(DiscoveryError::SearchControlMissing {
                asin: asin.to_owned(),
            });
        }
        self.submits.push(asin.to_owned());
        Ok(())
    }

    async fn loading_indicator_visible(&mut self) -> bool {
        if self.loading_ticks > 0 {
            self.loading_ticks -= 1;
            true
        } else {
            false
        }
    }

    async fn card_count(&mut self) -> usize {
        self.counts.pop_front().unwrap_or(self.final_count)
    }

    async fn page_contains(&mut self, _needle: &str) -> bool {
        if self.contains_requires_reload && self.hard_reloads == 0 {
            false
        } else {
            self.contains
        }
    }

    async fn reveal_more(&mut self) {}

    async fn harvest_cards(&mut self) -> Result<Vec<RawCard>, DiscoveryError> {
        self.harvests += 1;
        Ok(self.cards.clone())
    }
}

fn card(asin: &str, title: &str) -> RawCard {
    RawCard {
        text: String::new(),
        title: Some(title.to_owned()),
        asin: Some(asin.to_owned()),
        link: None,
        marketplace_flag: None,
    }
}

#[tokio::test]
async fn happy_path_harvests_after_stability_and_context_match() {
    let page = MockPage {
        loading_ticks: 2,
        counts: VecDeque::from([1, 2, 3]),
        final_count: 3,
        contains: true,
        cards: vec![card("B0XYZ12345", "Rival Bottle")],
        ..MockPage::default()
    };

    let mut driver = DiscoveryLoop::new(page, "amazon.in", fast_timings());
    let records = driver.run(&[seed("B0ABCDEFGH")]).await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].seed_asin, "B0ABCDEFGH");
    assert_eq!(records[0].competitor_asin, "B0XYZ12345");
    assert_eq!(records[0].product_link, "https://amazon.in/dp/B0XYZ12345");

    let page = driver.into_page();
    assert_eq!(page.submits, vec!["B0ABCDEFGH"]);
    assert_eq!(page.hard_reloads, 0);
    // Pre-search reset plus the proactive post-harvest reset.
    assert_eq!(page.soft_resets, 2);
}

#[tokio::test]
async fn soft_reset_failure_falls_back_to_hard_reload() {
    let page = MockPage {
        soft_reset_fails_first: true,
        final_count: 2,
        contains: true,
        cards: vec![card("B0XYZ12345", "Rival")],
        ..MockPage::default()
    };

    let mut driver = DiscoveryLoop::new(page, "amazon.in", fast_timings());
    let records = driver.run(&[seed("B0ABCDEFGH")]).await;

    assert_eq!(records.len(), 1);
    assert!(driver.into_page().hard_reloads >= 1);
}

#[tokio::test]
async fn missing_search_control_retries_once_after_hard_reload() {
    let page = MockPage {
        submit_misses: 1,
        final_count: 1,
        contains: true,
        cards: vec![card("B0XYZ12345", "Rival")],
        ..MockPage::default()
    };

    let mut driver = DiscoveryLoop::new(page, "amazon.in", fast_timings());
    let records = driver.run(&[seed("B0ABCDEFGH")]).await;

    assert_eq!(records.len(), 1);
    let page = driver.into_page();
    assert_eq!(page.hard_reloads, 1);
    assert_eq!(page.submits, vec!["B0ABCDEFGH"]);
}

#[tokio::test]
async fn stale_context_hard_reloads_and_retries_once() {
    let page = MockPage {
        final_count: 2,
        contains: true,
        contains_requires_reload: true,
        cards: vec![card("B0XYZ12345", "Rival")],
        ..MockPage::default()
    };

    let mut driver = DiscoveryLoop::new(page, "amazon.in", fast_timings());
    let records = driver.run(&[seed("B0ABCDEFGH")]).await;

    assert_eq!(records.len(), 1);
    assert_eq!(driver.into_page().hard_reloads, 1);
}

#[tokio::test]
async fn timeout_with_matching_context_harvests_best_effort() {
    // Counts never leave zero, but the page does mention the identifier:
    // proceed best-effort instead of skipping.
    let page = MockPage {
        final_count: 0,
        contains: true,
        cards: Vec::new(),
        ..MockPage::default()
    };

    let mut driver = DiscoveryLoop::new(page, "amazon.in", fast_timings());
    let records = driver.run(&[seed("B0ABCDEFGH")]).await;

    assert!(records.is_empty());
    let page = driver.into_page();
    assert_eq!(page.harvests, 1, "best-effort path must still harvest");
    assert_eq!(page.hard_reloads, 0);
}

#[tokio::test]
async fn failed_identifier_is_skipped_and_the_run_continues() {
    // Two submit misses exhaust the retry for the first seed; the second
    // seed proceeds normally.
    let page = MockPage {
        submit_misses: 2,
        final_count: 1,
        contains: true,
        cards: vec![card("B0XYZ12345", "Rival")],
        ..MockPage::default()
    };

    let mut driver = DiscoveryLoop::new(page, "amazon.in", fast_timings());
    let records = driver.run(&[seed("B0AAAAAAAA"), seed("B0BBBBBBBB")]).await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].seed_asin, "B0BBBBBBBB");
    let page = driver.into_page();
    assert_eq!(page.submits, vec!["B0BBBBBBBB"]);
    assert_eq!(page.hard_reloads, 1);
}

#[tokio::test]
async fn double_stale_context_skips_the_identifier() {
    let page = MockPage {
        final_count: 1,
        contains: false,
        cards: vec![card("B0XYZ12345", "Rival")],
        ..MockPage::default()
    };

    let mut driver = DiscoveryLoop::new(page, "amazon.in", fast_timings());
    let records = driver.run(&[seed("B0ABCDEFGH")]).await;

    assert!(records.is_empty());
    let page = driver.into_page();
    assert_eq!(page.harvests, 0);
    assert_eq!(page.hard_reloads, 1, "exactly one stale-context retry");
}
