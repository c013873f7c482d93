// file: src/generation/throttle.rs
// description: static request throttling in front of the generation service
// reference: https://docs.rs/tokio/latest/tokio/time/fn.sleep.html

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

/// Gate awaited before every generation request.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn acquire(&self);
}

/// Waits a fixed delay before each request, regardless of responses.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl RateLimiter for FixedDelay {
    async fn acquire(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Unthrottled;

#[async_trait]
impl RateLimiter for Unthrottled {
    async fn acquire(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_fixed_delay_waits() {
        let limiter = FixedDelay::new(Duration::from_millis(20));
        let started = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_unthrottled_returns_immediately() {
        let started = Instant::now();
        Unthrottled.acquire().await;
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
