use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use maze_core::{MazeTransport, TransportError};
use maze_settings::RetrySettings;
use rand::Rng;
use tracing::warn;

/// Backoff parameters for [`RetryingTransport`].
#[derive(Clone, Debug)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::from(&RetrySettings::default())
    }
}

impl From<&RetrySettings> for RetryConfig {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            base_delay: Duration::from_millis(settings.base_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
            jitter_factor: 0.2,
        }
    }
}

/// Wraps a transport and re-sends retryable failures with exponential
/// backoff and jitter. Non-retryable errors are returned immediately.
///
/// Every request to the maze service is idempotent for a given token, so
/// re-sending after a lost response is safe.
pub struct RetryingTransport<T: MazeTransport> {
    inner: T,
    config: RetryConfig,
    total_retries: AtomicU64,
}

impl<T: MazeTransport> RetryingTransport<T> {
    pub fn new(inner: T, config: RetryConfig) -> Self {
        Self {
            inner,
            config,
            total_retries: AtomicU64::new(0),
        }
    }

    pub fn with_defaults(inner: T) -> Self {
        Self::new(inner, RetryConfig::default())
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn total_retries(&self) -> u64 {
        self.total_retries.load(Ordering::Relaxed)
    }

    /// Delay before retry number `attempt` (zero-based): base * 2^attempt,
    /// capped at `max_delay`, then spread by the jitter factor.
    fn retry_delay(&self, attempt: u32) -> Duration {
        let exp_delay = self.config.base_delay.as_millis() as f64 * 2.0_f64.powi(attempt as i32);
        let capped = exp_delay.min(self.config.max_delay.as_millis() as f64);

        let jitter_range = capped * self.config.jitter_factor;
        let jitter = if jitter_range > 0.0 {
            rand::thread_rng().gen_range(-jitter_range..=jitter_range)
        } else {
            0.0
        };

        Duration::from_millis((capped + jitter).max(0.0) as u64)
    }
}

#[async_trait]
impl<T: MazeTransport> MazeTransport for RetryingTransport<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn send(&self, query: &str) -> Result<String, TransportError> {
        let mut attempt = 0;
        loop {
            match self.inner.send(query).await {
                Ok(body) => return Ok(body),
                Err(e) if !e.is_retryable() || attempt >= self.config.max_retries => return Err(e),
                Err(e) => {
                    let delay = self.retry_delay(attempt);
                    let _ = self.total_retries.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        attempt = attempt + 1,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        kind = e.error_kind(),
                        error = %e,
                        "retrying maze request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
