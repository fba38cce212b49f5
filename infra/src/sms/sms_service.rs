//! SMS Service Interface

use async_trait::async_trait;

use crate::InfrastructureError;

/// SMS service trait for sending text messages
///
/// Implementations: Twilio for production, a mock for development.
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS to an E.164 phone number, returning the provider's message id
    async fn send_sms(&self, phone_number: &str, message: &str)
        -> Result<String, InfrastructureError>;

    /// Provider name for logs ("Twilio", "Mock")
    fn provider_name(&self) -> &str;

    async fn is_available(&self) -> bool {
        true
    }
}
