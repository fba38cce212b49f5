//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `rc_core`:
//!
//! - **Database**: MySQL repositories using SQLx
//! - **Cache**: Redis client and the sliding-window rate limiter
//! - **SMS**: code delivery through Twilio, or a mock for development
//! - **Email**: code delivery over SMTP (lettre), or a mock for development
//!
//! ## Features
//!
//! - `twilio-sms`: Enable the Twilio SMS provider (default)

pub mod cache;
pub mod config;
pub mod database;
pub mod email;
pub mod sms;

use rc_core::errors::DomainError;

pub use config::{EmailConfig, EmailProvider, InfrastructureConfig, SmsConfig, SmsProvider};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure at start-up
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Email service error
    #[error("Email service error: {0}")]
    Email(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::internal(err)
    }
}
