//! Shared utilities and common types for the RealtyChance server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error response structures
//! - Utility functions (phone and email normalization)
//! - Pagination and response wrappers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, CorsConfig, DatabaseConfig, DispatchFailurePolicy, Environment,
    JwtConfig, LogFormat, LoggingConfig, RateLimitConfig, ServerConfig, VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, HealthResponse, HealthStatus, PaginatedResponse, Pagination};
pub use utils::{email, phone};
