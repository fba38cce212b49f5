//! API response types and wrappers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Simple acknowledgement wrapper for endpoints without a resource body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,

    /// Human-readable status message
    pub message: String,

    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response carrying data
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Create a successful response with a message only
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,

    /// Storage backend in use (`mysql` or `memory`)
    pub storage: String,

    /// Rate limiter backend in use (`redis` or `memory`)
    pub rate_limiter: String,

    /// Server timestamp
    pub timestamp: DateTime<Utc>,

    /// Server version
    pub version: String,
}

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}
