//! Bridges an `SmsService` to the verification service's `CodeDispatcher`.

use async_trait::async_trait;
use std::sync::Arc;

use rc_core::domain::value_objects::{Channel, VerificationPurpose};
use rc_core::services::verification::{CodeDispatcher, OutboundCode};

use super::sms_service::SmsService;

/// Delivers phone verification codes over SMS
pub struct SmsCodeDispatcher {
    service: Arc<dyn SmsService>,
}

impl SmsCodeDispatcher {
    pub fn new(service: Arc<dyn SmsService>) -> Self {
        Self { service }
    }
}

/// Text of the SMS carrying `message.code`
pub fn sms_body(message: &OutboundCode) -> String {
    match message.purpose {
        VerificationPurpose::Registration => format!(
            "Your RealtyChance verification code is {}. It expires in {} minutes.",
            message.code, message.expires_in_minutes
        ),
        VerificationPurpose::PasswordReset => format!(
            "Your RealtyChance password reset code is {}. It expires in {} minutes. \
             If you did not request it, ignore this message.",
            message.code, message.expires_in_minutes
        ),
    }
}

#[async_trait]
impl CodeDispatcher for SmsCodeDispatcher {
    fn channel(&self) -> Channel {
        Channel::Sms
    }

    async fn dispatch(&self, message: &OutboundCode) -> Result<String, String> {
        self.service
            .send_sms(&message.recipient, &sms_body(message))
            .await
            .map_err(|e| {
                tracing::warn!(
                    provider = self.service.provider_name(),
                    error = %e,
                    "SMS dispatch failed"
                );
                e.to_string()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sms::MockSmsService;

    fn outbound(purpose: VerificationPurpose) -> OutboundCode {
        OutboundCode {
            recipient: "+15551234567".to_string(),
            code: "482193".to_string(),
            purpose,
            expires_in_minutes: 5,
        }
    }

    #[tokio::test]
    async fn test_dispatch_sends_code_text() {
        let mock = MockSmsService::new();
        let dispatcher = SmsCodeDispatcher::new(Arc::new(mock.clone()));

        assert_eq!(dispatcher.channel(), Channel::Sms);
        let id = dispatcher
            .dispatch(&outbound(VerificationPurpose::Registration))
            .await
            .unwrap();

        let sent = mock.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message_id, id);
        assert!(sent[0].body.contains("482193"));
        assert!(sent[0].body.contains("5 minutes"));
    }

    #[tokio::test]
    async fn test_password_reset_wording() {
        let body = sms_body(&outbound(VerificationPurpose::PasswordReset));
        assert!(body.contains("password reset code is 482193"));
    }

    #[tokio::test]
    async fn test_provider_failure_becomes_dispatch_error() {
        let mock = MockSmsService::new();
        mock.set_simulate_failure(true);
        let dispatcher = SmsCodeDispatcher::new(Arc::new(mock));

        let err = dispatcher
            .dispatch(&outbound(VerificationPurpose::Registration))
            .await
            .unwrap_err();
        assert!(err.contains("Simulated SMS sending failure"));
    }
}
