//! Process-local sliding window limiter

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::services::clock::{Clock, SystemClock};

use super::traits::{RateLimitDecision, RateLimiter};

/// Keeps hit timestamps per key in memory. Suitable for a single instance
/// and for tests; multi-instance deployments use the Redis limiter.
pub struct InMemoryRateLimiter {
    hits: Mutex<HashMap<String, VecDeque<DateTime<Utc>>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRateLimiter {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            hits: Mutex::new(HashMap::new()),
            clock,
        }
    }
}

impl Default for InMemoryRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn hit(
        &self,
        key: &str,
        limit: u32,
        window_seconds: u64,
    ) -> Result<RateLimitDecision, String> {
        let now = self.clock.now();
        let window = Duration::seconds(window_seconds as i64);
        let mut hits = self.hits.lock().await;
        let entries = hits.entry(key.to_string()).or_default();

        while entries.front().is_some_and(|t| *t <= now - window) {
            entries.pop_front();
        }

        if entries.len() as u32 >= limit {
            let retry_after = entries
                .front()
                .map(|oldest| (*oldest + window - now).num_seconds().max(1) as u64)
                .unwrap_or(window_seconds);
            return Ok(RateLimitDecision::Limited {
                retry_after_seconds: retry_after,
            });
        }

        entries.push_back(now);
        Ok(RateLimitDecision::Allowed {
            remaining: limit - entries.len() as u32,
        })
    }

    async fn reset(&self, key: &str) -> Result<(), String> {
        self.hits.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::ManualClock;

    #[tokio::test]
    async fn test_limits_within_window() {
        let limiter = InMemoryRateLimiter::new();

        for expected_remaining in (0..3).rev() {
            let decision = limiter.hit("k", 3, 60).await.unwrap();
            assert_eq!(
                decision,
                RateLimitDecision::Allowed {
                    remaining: expected_remaining
                }
            );
        }
        assert!(!limiter.hit("k", 3, 60).await.unwrap().is_allowed());
        assert!(limiter.hit("other", 3, 60).await.unwrap().is_allowed());
    }

    #[tokio::test]
    async fn test_window_slides() {
        let clock = Arc::new(ManualClock::default());
        let limiter = InMemoryRateLimiter::with_clock(clock.clone());

        limiter.hit("k", 1, 60).await.unwrap();
        clock.advance(Duration::seconds(20));
        assert_eq!(
            limiter.hit("k", 1, 60).await.unwrap(),
            RateLimitDecision::Limited {
                retry_after_seconds: 40
            }
        );

        clock.advance(Duration::seconds(41));
        assert!(limiter.hit("k", 1, 60).await.unwrap().is_allowed());
    }

    #[tokio::test]
    async fn test_reset() {
        let limiter = InMemoryRateLimiter::new();
        limiter.hit("k", 1, 60).await.unwrap();
        limiter.reset("k").await.unwrap();
        assert!(limiter.hit("k", 1, 60).await.unwrap().is_allowed());
    }
}
