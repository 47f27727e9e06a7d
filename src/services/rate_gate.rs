//! Minimum-spacing gate in front of the content service.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Serializes callers so that no two gated calls start less than
/// `min_interval` apart, no matter which task issued them.
///
/// The lock is held across the wait, so a second caller queues behind the
/// first instead of reading a stale timestamp. A caller that is dropped while
/// waiting releases the lock without recording a call.
#[derive(Debug)]
pub struct RateGate {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateGate {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub async fn acquire(&self) {
        let mut last_call = self.last_call.lock().await;

        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(wait_ms = wait.as_millis(), "Rate gate delaying call");
                metrics::histogram!("rate_gate_wait_seconds").record(wait.as_secs_f64());
                sleep(wait).await;
            }
        }

        *last_call = Some(Instant::now());
    }
}
