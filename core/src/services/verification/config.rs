//! Configuration for the verification service

use rc_shared::config::{DispatchFailurePolicy, RateLimitConfig, VerificationConfig};

use crate::domain::entities::verification_request::{
    CODE_LENGTH, DEFAULT_EXPIRATION_SECONDS, MAX_ATTEMPTS,
};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of digits per code
    pub code_length: usize,
    /// Seconds before a code expires
    pub code_ttl_seconds: i64,
    /// Maximum number of wrong submissions allowed
    pub max_attempts: i32,
    /// What to do with a stored code whose delivery failed
    pub dispatch_failure_policy: DispatchFailurePolicy,
    /// Request limits
    pub rate_limit: RateLimitConfig,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_length: CODE_LENGTH,
            code_ttl_seconds: DEFAULT_EXPIRATION_SECONDS,
            max_attempts: MAX_ATTEMPTS,
            dispatch_failure_policy: DispatchFailurePolicy::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl VerificationServiceConfig {
    pub fn from_settings(verification: &VerificationConfig, rate_limit: &RateLimitConfig) -> Self {
        Self {
            code_length: verification.code_length,
            code_ttl_seconds: verification.code_ttl_seconds,
            max_attempts: verification.max_attempts,
            dispatch_failure_policy: verification.dispatch_failure_policy,
            rate_limit: rate_limit.clone(),
        }
    }
}
