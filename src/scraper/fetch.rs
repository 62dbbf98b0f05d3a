//! HTTP fetching with exponential backoff retry logic.
//!
//! # Retry Strategy
//!
//! - Maximum 3 retry attempts per URL
//! - Exponential backoff starting at 500ms
//! - Maximum delay capped at 10 seconds
//! - Random jitter (0-250ms) added to prevent thundering herd
//!
//! The delay between retries follows this formula:
//! ```text
//! delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
//! ```

use rand::{rng, Rng};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{instrument, warn};

use crate::config::JournalistConfig;
use crate::error::{Error, Result};

/// Shared HTTP client with per-request timeout and retry-with-backoff.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    max_retries: usize,
    base_delay: Duration,
    max_delay: Duration,
}

impl Fetcher {
    /// Build a client from the instance configuration.
    pub fn new(config: &JournalistConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        })
    }

    /// Fetch a URL and return its body text, retrying transient failures
    /// with exponential backoff and jitter.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            match self.get_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    attempt += 1;
                    if attempt > self.max_retries {
                        warn!(
                            %url,
                            attempt,
                            elapsed_ms_total = total_t0.elapsed().as_millis() as u64,
                            error = %e,
                            "Fetch exhausted retries"
                        );
                        return Err(e);
                    }

                    // backoff calc
                    let mut delay = self.base_delay.saturating_mul(1 << (attempt - 1));
                    if delay > self.max_delay {
                        delay = self.max_delay;
                    }
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + Duration::from_millis(jitter_ms);

                    warn!(
                        %url,
                        attempt,
                        max = self.max_retries,
                        ?delay,
                        error = %e,
                        "Fetch attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    async fn get_once(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Network {
                url: url.to_string(),
                status: Some(status.as_u16()),
            });
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_builds_from_default_config() {
        let config = JournalistConfig::default();
        assert!(Fetcher::new(&config).is_ok());
    }

    #[test]
    fn test_backoff_delays_are_capped() {
        let config = JournalistConfig::default();
        let fetcher = Fetcher::new(&config).unwrap();

        let mut delay = fetcher.base_delay.saturating_mul(1 << 9);
        if delay > fetcher.max_delay {
            delay = fetcher.max_delay;
        }
        assert_eq!(delay, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_unroutable_url_surfaces_error() {
        let mut config = JournalistConfig::default();
        config.request_timeout = Duration::from_millis(100);
        let fetcher = Fetcher {
            client: reqwest::Client::builder()
                .timeout(config.request_timeout)
                .build()
                .unwrap(),
            max_retries: 0,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(1),
        };
        let result = fetcher.fetch_text("http://127.0.0.1:1/never-listening").await;
        assert!(result.is_err());
    }
}
