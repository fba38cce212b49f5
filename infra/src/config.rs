//! Configuration for the delivery providers.
//!
//! Database and Redis settings live in `rc_shared::config`; the SMS and email
//! provider credentials are only needed by this crate and are read here.

use std::str::FromStr;

use crate::InfrastructureError;

/// Which SMS gateway delivers phone codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmsProvider {
    /// Log the code instead of sending it
    #[default]
    Mock,
    Twilio,
}

impl FromStr for SmsProvider {
    type Err = InfrastructureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" | "" => Ok(SmsProvider::Mock),
            "twilio" => Ok(SmsProvider::Twilio),
            other => Err(InfrastructureError::Config(format!(
                "Unknown SMS_PROVIDER: {}",
                other
            ))),
        }
    }
}

/// Which transport delivers email codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailProvider {
    /// Log the code instead of sending it
    #[default]
    Mock,
    Smtp,
}

impl FromStr for EmailProvider {
    type Err = InfrastructureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" | "" => Ok(EmailProvider::Mock),
            "smtp" => Ok(EmailProvider::Smtp),
            other => Err(InfrastructureError::Config(format!(
                "Unknown EMAIL_PROVIDER: {}",
                other
            ))),
        }
    }
}

/// SMS service configuration
#[derive(Debug, Clone, Default)]
pub struct SmsConfig {
    /// SMS service provider ("twilio", "mock")
    pub provider: SmsProvider,
    /// Twilio account SID
    pub account_sid: String,
    /// Twilio auth token
    pub auth_token: String,
    /// From phone number (E.164)
    pub from_number: String,
    /// Maximum delivery attempts per message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds, doubled on each retry
    pub retry_delay_ms: u64,
}

impl SmsConfig {
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let provider = std::env::var("SMS_PROVIDER")
            .unwrap_or_default()
            .parse::<SmsProvider>()?;

        Ok(Self {
            provider,
            account_sid: std::env::var("TWILIO_ACCOUNT_SID").unwrap_or_default(),
            auth_token: std::env::var("TWILIO_AUTH_TOKEN").unwrap_or_default(),
            from_number: std::env::var("TWILIO_FROM_NUMBER").unwrap_or_default(),
            max_retries: env_or("TWILIO_MAX_RETRIES", 3),
            retry_delay_ms: env_or("TWILIO_RETRY_DELAY_MS", 1000),
        })
    }
}

/// Email service configuration
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub provider: EmailProvider,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    /// Use STARTTLS instead of implicit TLS
    pub starttls: bool,
    /// Sender mailbox, e.g. `RealtyChance <no-reply@realtychance.com>`
    pub from_address: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Mock,
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            smtp_username: None,
            smtp_password: None,
            starttls: true,
            from_address: "RealtyChance <no-reply@realtychance.com>".to_string(),
        }
    }
}

impl EmailConfig {
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let defaults = Self::default();
        let provider = std::env::var("EMAIL_PROVIDER")
            .unwrap_or_default()
            .parse::<EmailProvider>()?;

        Ok(Self {
            provider,
            smtp_host: std::env::var("SMTP_HOST").unwrap_or(defaults.smtp_host),
            smtp_port: env_or("SMTP_PORT", defaults.smtp_port),
            smtp_username: std::env::var("SMTP_USERNAME").ok().filter(|v| !v.is_empty()),
            smtp_password: std::env::var("SMTP_PASSWORD").ok().filter(|v| !v.is_empty()),
            starttls: std::env::var("SMTP_STARTTLS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.starttls),
            from_address: std::env::var("SMTP_FROM").unwrap_or(defaults.from_address),
        })
    }
}

/// Delivery settings for both verification channels
#[derive(Debug, Clone, Default)]
pub struct InfrastructureConfig {
    pub sms: SmsConfig,
    pub email: EmailConfig,
}

impl InfrastructureConfig {
    /// Load configuration from the environment, reading `.env` if present
    pub fn from_env() -> Result<Self, InfrastructureError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            sms: SmsConfig::from_env()?,
            email: EmailConfig::from_env()?,
        })
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("".parse::<SmsProvider>().unwrap(), SmsProvider::Mock);
        assert_eq!("Twilio".parse::<SmsProvider>().unwrap(), SmsProvider::Twilio);
        assert!("aws-sns".parse::<SmsProvider>().is_err());

        assert_eq!("smtp".parse::<EmailProvider>().unwrap(), EmailProvider::Smtp);
        assert!("sendgrid".parse::<EmailProvider>().is_err());
    }

    #[test]
    fn test_email_defaults() {
        let config = EmailConfig::default();
        assert_eq!(config.provider, EmailProvider::Mock);
        assert_eq!(config.smtp_port, 587);
        assert!(config.starttls);
    }
}
