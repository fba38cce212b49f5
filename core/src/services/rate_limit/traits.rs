//! Rate limiter trait

use async_trait::async_trait;

/// Outcome of recording a hit against a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// The hit was counted; `remaining` more are allowed in the window
    Allowed { remaining: u32 },
    /// The window is full; the hit was not counted
    Limited { retry_after_seconds: u64 },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// Sliding-window limiter keyed by arbitrary strings
/// (`otp:identifier:+15551234567`, `otp:ip:203.0.113.7`).
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Record a hit for `key` unless `limit` hits already fall inside the last
    /// `window_seconds`.
    async fn hit(
        &self,
        key: &str,
        limit: u32,
        window_seconds: u64,
    ) -> Result<RateLimitDecision, String>;

    /// Forget every hit for `key`
    async fn reset(&self, key: &str) -> Result<(), String>;
}
