//! Rate limiting configuration

use serde::{Deserialize, Serialize};

/// Limits applied to verification code requests
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Max codes per phone number or email per window
    pub codes_per_identifier: u32,

    /// Max codes requested from a single client IP per window
    pub codes_per_ip: u32,

    /// Window length in seconds
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            codes_per_identifier: 5,
            codes_per_ip: 20,
            window_seconds: 3600, // 1 hour
        }
    }
}

impl RateLimitConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("RATE_LIMIT_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.enabled),
            codes_per_identifier: std::env::var("RATE_LIMIT_CODES_PER_IDENTIFIER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.codes_per_identifier),
            codes_per_ip: std::env::var("RATE_LIMIT_CODES_PER_IP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.codes_per_ip),
            window_seconds: std::env::var("RATE_LIMIT_WINDOW_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.window_seconds),
        }
    }

    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            codes_per_identifier: 20,
            codes_per_ip: 100,
            ..Default::default()
        }
    }

    /// Disabled rate limiting, used by tests
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

fn default_enabled() -> bool {
    true
}
