//! Twilio SMS Service Implementation
//!
//! Sends through the Twilio Messages API with E.164 re-validation and
//! exponential backoff on rate-limit and server errors.

use async_trait::async_trait;
use phonenumber::{Mode, PhoneNumber};
use rc_shared::utils::phone::mask_phone_number;
use std::time::Duration;
use tracing::{error, info, warn};
use twilio::{Client, OutboundMessage};

use super::sms_service::SmsService;
use crate::config::SmsConfig;
use crate::InfrastructureError;

/// Twilio's limit on a single message body
const MAX_MESSAGE_LENGTH: usize = 1600;

/// Twilio SMS service configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
}

impl TryFrom<&SmsConfig> for TwilioConfig {
    type Error = InfrastructureError;

    fn try_from(config: &SmsConfig) -> Result<Self, Self::Error> {
        if config.account_sid.is_empty() {
            return Err(InfrastructureError::Config(
                "TWILIO_ACCOUNT_SID not set".to_string(),
            ));
        }
        if config.auth_token.is_empty() {
            return Err(InfrastructureError::Config(
                "TWILIO_AUTH_TOKEN not set".to_string(),
            ));
        }
        if !config.from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            max_retries: config.max_retries.max(1),
            retry_delay_ms: config.retry_delay_ms,
        })
    }
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    pub fn new(config: TwilioConfig) -> Self {
        let client = Client::new(&config.account_sid, &config.auth_token);

        info!(
            from = %mask_phone_number(&config.from_number),
            "Twilio SMS service initialized"
        );

        Self { client, config }
    }

    /// Re-validate an E.164 number before it leaves the process
    fn validate_phone_number(&self, phone: &str) -> Result<String, InfrastructureError> {
        if !phone.starts_with('+') {
            return Err(InfrastructureError::Sms(
                "Phone number must be in E.164 format (e.g., +15551234567)".to_string(),
            ));
        }

        let parsed = phone.parse::<PhoneNumber>().map_err(|e| {
            error!(phone = %mask_phone_number(phone), "Invalid phone number format: {}", e);
            InfrastructureError::Sms(format!("Invalid phone number format: {}", e))
        })?;

        Ok(parsed.format().mode(Mode::E164).to_string())
    }

    async fn send_with_retry(
        &self,
        to: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            let msg = OutboundMessage::new(&self.config.from_number, to, message);
            match self.client.send_message(msg).await {
                Ok(response) => {
                    info!(
                        phone = %mask_phone_number(to),
                        sid = %response.sid,
                        attempts,
                        "SMS sent via Twilio"
                    );
                    return Ok(response.sid);
                }
                Err(e) => {
                    let reason = e.to_string();
                    error!(
                        "Failed to send SMS (attempt {}/{}): {}",
                        attempts, self.config.max_retries, reason
                    );

                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Sms(format!(
                            "Failed to send SMS after {} attempts: {}",
                            attempts, reason
                        )));
                    }
                    if !is_retryable(&reason) {
                        return Err(InfrastructureError::Sms(format!(
                            "Invalid request: {}",
                            reason
                        )));
                    }

                    warn!("Retrying SMS in {:?}", delay);
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }
}

/// Rate limiting and server-side failures are worth another attempt;
/// client errors (bad number, unverified sender) are not.
fn is_retryable(reason: &str) -> bool {
    let reason = reason.to_lowercase();
    if reason.contains("400") || reason.contains("invalid") {
        return false;
    }
    true
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        let normalized_phone = self.validate_phone_number(phone_number)?;

        if message.len() > MAX_MESSAGE_LENGTH {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        self.send_with_retry(&normalized_phone, message).await
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sms_config() -> SmsConfig {
        SmsConfig {
            provider: crate::config::SmsProvider::Twilio,
            account_sid: "ACtest".to_string(),
            auth_token: "test_token".to_string(),
            from_number: "+15550006789".to_string(),
            max_retries: 3,
            retry_delay_ms: 10,
        }
    }

    #[test]
    fn test_config_from_sms_config() {
        let config = TwilioConfig::try_from(&sms_config()).unwrap();
        assert_eq!(config.account_sid, "ACtest");
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_config_validation() {
        let mut missing_sid = sms_config();
        missing_sid.account_sid.clear();
        assert!(TwilioConfig::try_from(&missing_sid).is_err());

        let mut bad_from = sms_config();
        bad_from.from_number = "15550006789".to_string();
        let err = TwilioConfig::try_from(&bad_from).unwrap_err();
        assert!(err.to_string().contains("E.164 format"));
    }

    #[test]
    fn test_phone_validation() {
        let service = TwilioSmsService::new(TwilioConfig::try_from(&sms_config()).unwrap());

        assert_eq!(
            service.validate_phone_number("+14155552671").unwrap(),
            "+14155552671"
        );
        assert!(service.validate_phone_number("4155552671").is_err());
    }

    #[test]
    fn test_retry_classification() {
        assert!(is_retryable("HTTP 503 Service Unavailable"));
        assert!(is_retryable("429 Too Many Requests"));
        assert!(!is_retryable("400: The 'To' number is not a valid phone number"));
    }
}
