//! Email Service Interface

use async_trait::async_trait;

use crate::InfrastructureError;

/// Outgoing plain-text email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Email service trait, mirroring `SmsService` for the email channel
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send a message, returning its id
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError>;

    fn provider_name(&self) -> &str;
}
