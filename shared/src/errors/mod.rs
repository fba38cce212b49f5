//! Shared error response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable reason code (e.g. `expired`, `not_verified`)
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, retry hints, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Reason codes that are produced outside the domain layer
pub mod error_codes {
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const FORBIDDEN: &str = "forbidden";
    pub const NOT_FOUND: &str = "not_found";
    pub const METHOD_NOT_ALLOWED: &str = "method_not_allowed";
    pub const BAD_REQUEST: &str = "bad_request";
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_details() {
        let response = ErrorResponse::new("rate_limited", "Too many requests")
            .add_detail("retry_after_seconds", 42);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"], "rate_limited");
        assert_eq!(json["details"]["retry_after_seconds"], 42);
    }

    #[test]
    fn test_details_omitted_when_empty() {
        let json = serde_json::to_value(ErrorResponse::new("expired", "Code expired")).unwrap();
        assert!(json.get("details").is_none());
    }
}
