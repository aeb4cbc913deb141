use async_trait::async_trait;
use std::time::Duration;

/// Pacing applied after every mutating API call
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimitPolicy: Send + Sync {
    /// Block until the next call may be issued
    async fn wait(&self);
}

/// Sleeps for a fixed delay between calls
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl RateLimitPolicy for FixedDelay {
    async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl RateLimitPolicy for NoDelay {
    async fn wait(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_delay_defaults_to_one_second() {
        assert_eq!(FixedDelay::default().delay(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_fixed_delay_sleeps() {
        let limiter = FixedDelay::new(Duration::from_millis(20));
        let start = tokio::time::Instant::now();
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_no_delay_returns_immediately() {
        let start = std::time::Instant::now();
        NoDelay.wait().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
