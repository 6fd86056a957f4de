//! Fixed-delay retry for per-target scrape attempts.
//!
//! Unlike a backoff schedule, every wait is the same length: the storefront
//! either serves the page on a later attempt or it does not, and the caller
//! advances to the next marketplace target once attempts are exhausted.

use std::future::Future;
use std::time::Duration;

use crate::error::ScrapeError;

/// Runs `operation` with up to `max_retries` additional attempts after the
/// first failure, sleeping `delay_secs` between attempts.
///
/// Every [`ScrapeError`] is treated as transient here: a timeout, a non-200
/// status, and a title-less page are all "not found on this target yet", and
/// the distinction only matters to the caller after exhaustion.
pub(crate) async fn retry_fixed_delay<T, F, Fut>(
    max_retries: u32,
    delay_secs: u64,
    mut operation: F,
) -> Result<T, ScrapeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScrapeError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_secs,
                    error = %err,
                    "scrape attempt failed — retrying after fixed delay"
                );
                tokio::time::sleep(Duration::from_secs(delay_secs)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn status_err() -> ScrapeError {
        ScrapeError::Status {
            status: 503,
            url: "https://www.amazon.in/dp/B0ABCDEFGH".to_owned(),
        }
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_fixed_delay(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, ScrapeError>(7)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_fixed_delay(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let n = c.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(status_err())
                } else {
                    Ok::<u32, ScrapeError>(9)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 9);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn returns_last_error_after_exhaustion() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_fixed_delay(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ScrapeError>(status_err())
            }
        })
        .await;
        // max_retries = 2 → 3 total attempts
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(ScrapeError::Status { .. })));
    }
}
