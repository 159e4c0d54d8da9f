//! Fixed-delay request pacing

use std::time::Duration;
use tracing::debug;

/// Enforces a fixed delay before every outgoing request
#[derive(Debug)]
pub struct RequestPacer {
    /// Delay slept before each request
    delay: Duration,
    /// Requests paced so far
    request_count: u64,
}

impl RequestPacer {
    /// Create a pacer with the given delay in milliseconds
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            request_count: 0,
        }
    }

    /// Sleep for the configured delay and count the request
    pub async fn wait(&mut self) {
        if !self.delay.is_zero() {
            debug!("Pacing request {} by {:?}", self.request_count + 1, self.delay);
            tokio::time::sleep(self.delay).await;
        }
        self.request_count += 1;
    }

    /// Configured delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of requests paced so far
    pub fn request_count(&self) -> u64 {
        self.request_count
    }
}
