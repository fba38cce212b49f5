//! Verification code configuration

use serde::{Deserialize, Serialize};

/// What happens to a stored code when the SMS/email channel fails to deliver it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchFailurePolicy {
    /// Delete the undelivered request so it cannot occupy the slot
    #[default]
    Revoke,
    /// Keep the request valid even though delivery failed
    Keep,
}

impl std::str::FromStr for DispatchFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "revoke" => Ok(Self::Revoke),
            "keep" => Ok(Self::Keep),
            other => Err(format!("Unknown dispatch failure policy: {}", other)),
        }
    }
}

/// One-time code settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Number of digits in a generated code
    pub code_length: usize,

    /// Lifetime of a code in seconds
    pub code_ttl_seconds: i64,

    /// Wrong submissions accepted before the code is locked
    pub max_attempts: i32,

    /// Behaviour when the dispatch channel fails
    pub dispatch_failure_policy: DispatchFailurePolicy,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            code_ttl_seconds: 300,
            max_attempts: 5,
            dispatch_failure_policy: DispatchFailurePolicy::default(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_length: std::env::var("VERIFICATION_CODE_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|len| (4..=10).contains(len))
                .unwrap_or(defaults.code_length),
            code_ttl_seconds: std::env::var("VERIFICATION_CODE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.code_ttl_seconds),
            max_attempts: std::env::var("VERIFICATION_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_attempts),
            dispatch_failure_policy: std::env::var("VERIFICATION_DISPATCH_FAILURE_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.dispatch_failure_policy),
        }
    }
}
