//! Rate-limited page fetching.
//!
//! One [`Fetcher`] owns one throttle: before each request it waits out the
//! remainder of the configured minimum interval since the previous request
//! was issued. The limiter state lives behind a `tokio` mutex and the mutex
//! is held across the wait, so when the fetcher is shared across concurrent
//! lanes the throttle is a true global one - request *issue* serializes
//! through the interval while body downloads still overlap. The trade-off is
//! throughput for politeness: with N lanes and interval I, at most one
//! request starts per I regardless of N.
//!
//! Fetches are single-shot. Any transport error or non-2xx status surfaces
//! as an error the orchestrator treats as a terminal per-URL failure; retry
//! policy belongs to a layer above this one.

use crate::error::EngineError;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, instrument};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Browser-like User-Agent; some sites refuse obviously robotic clients.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// HTTP fetcher with a per-instance minimum inter-request interval.
#[derive(Debug)]
pub struct Fetcher {
    client: reqwest::Client,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Fetcher {
    pub fn new(min_interval: Duration) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            min_interval,
            last_request: Mutex::new(None),
        })
    }

    /// Fetch raw markup from a URL, honoring the rate limit.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<String, EngineError> {
        self.wait_for_slot().await;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| EngineError::Fetch {
                url: url.to_string(),
                source: e,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::FetchStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|e| EngineError::Fetch {
            url: url.to_string(),
            source: e,
        })?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }

    /// Block until the minimum interval since the last request has passed,
    /// then claim the slot.
    async fn wait_for_slot(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(?wait, "Rate limit: waiting before next request");
                sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_request_does_not_wait() {
        let fetcher = Fetcher::new(Duration::from_secs(1)).unwrap();
        let t0 = Instant::now();
        fetcher.wait_for_slot().await;
        assert_eq!(t0.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_to_back_requests_honor_interval() {
        let fetcher = Fetcher::new(Duration::from_millis(500)).unwrap();
        let t0 = Instant::now();
        fetcher.wait_for_slot().await;
        fetcher.wait_for_slot().await;
        fetcher.wait_for_slot().await;
        assert!(t0.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_interval_means_no_wait() {
        let fetcher = Fetcher::new(Duration::from_millis(100)).unwrap();
        fetcher.wait_for_slot().await;
        sleep(Duration::from_millis(200)).await;
        let t0 = Instant::now();
        fetcher.wait_for_slot().await;
        assert_eq!(t0.elapsed(), Duration::ZERO);
    }
}
