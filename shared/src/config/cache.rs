//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Redis configuration backing the rate limiter.
///
/// Without a URL the rate limiter keeps its windows in process memory.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: Option<String>,

    /// Key prefix applied to every rate limit key
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("REDIS_URL").ok().filter(|u| !u.is_empty()),
            key_prefix: std::env::var("REDIS_KEY_PREFIX").ok(),
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            key_prefix: None,
        }
    }

    /// Whether Redis is configured
    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }
}
