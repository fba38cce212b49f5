//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing configuration
//! - `cache` - Redis configuration for rate limiting
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - Limits for verification code requests
//! - `server` - HTTP server and CORS configuration
//! - `verification` - One-time code length, lifetime and attempt limits

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod rate_limit;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::RateLimitConfig;
pub use server::{CorsConfig, ServerConfig};
pub use verification::{DispatchFailurePolicy, VerificationConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Redis configuration
    pub cache: CacheConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// One-time code configuration
    pub verification: VerificationConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            jwt: JwtConfig::from_env(),
            verification: VerificationConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Configuration problems that must stop a production start-up
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        if self.verification.code_ttl_seconds <= 0 {
            return Err("VERIFICATION_CODE_TTL_SECONDS must be positive".to_string());
        }
        if self.verification.max_attempts <= 0 {
            return Err("VERIFICATION_MAX_ATTEMPTS must be positive".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_production_requires_secret() {
        let config = AppConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            environment: Environment::Production,
            jwt: JwtConfig::new("a-real-secret"),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
