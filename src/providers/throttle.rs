/*!
 * Request spacing shared by the HTTP providers.
 */

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Keeps a minimum interval between consecutive requests to one endpoint
#[derive(Debug)]
pub struct RequestThrottle {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestThrottle {
    /// Create a throttle; a zero interval never waits
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Configured interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Sleep until the interval since the previous request has passed, then
    /// record the current request
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
