use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Client-side request pacing shared by every worker of one scan.
#[derive(Clone)]
pub struct RateLimiter {
    interval: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// rate = requests per second, 0 disables pacing
    pub fn new(rate: u32) -> Self {
        let interval = if rate == 0 {
            Duration::from_secs(0)
        } else {
            Duration::from_secs_f64(1.0 / rate as f64)
        };

        Self {
            interval,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(0)
    }

    pub fn is_unlimited(&self) -> bool {
        self.interval.is_zero()
    }

    pub async fn wait(&self) {
        if self.is_unlimited() {
            return;
        }

        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.interval {
                tokio::time::sleep(self.interval - elapsed).await;
            }
        }

        *last = Some(Instant::now());
    }
}
