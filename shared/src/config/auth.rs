//! Authentication configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    #[serde(default)]
    pub audience: Option<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            issuer: String::from("realtychance"),
            audience: None,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            access_token_expiry: std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.access_token_expiry),
            refresh_token_expiry: std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_token_expiry),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: std::env::var("JWT_AUDIENCE").ok(),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}
