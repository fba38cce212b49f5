//! Bridges an `EmailService` to the verification service's `CodeDispatcher`.

use async_trait::async_trait;
use std::sync::Arc;

use rc_core::domain::value_objects::{Channel, VerificationPurpose};
use rc_core::services::verification::{CodeDispatcher, OutboundCode};

use super::email_service::{EmailMessage, EmailService};

pub struct EmailCodeDispatcher {
    service: Arc<dyn EmailService>,
}

impl EmailCodeDispatcher {
    pub fn new(service: Arc<dyn EmailService>) -> Self {
        Self { service }
    }
}

/// Subject and body for the email carrying `message.code`
pub fn code_email(message: &OutboundCode) -> EmailMessage {
    let (subject, intro) = match message.purpose {
        VerificationPurpose::Registration => (
            "Verify your RealtyChance account",
            "Welcome to RealtyChance! Use this code to verify your email address:",
        ),
        VerificationPurpose::PasswordReset => (
            "Reset your RealtyChance password",
            "Use this code to reset your RealtyChance password:",
        ),
    };

    EmailMessage {
        to: message.recipient.clone(),
        subject: subject.to_string(),
        body: format!(
            "{}\n\n    {}\n\nThe code expires in {} minutes. \
             If you did not request it, you can ignore this email.\n",
            intro, message.code, message.expires_in_minutes
        ),
    }
}

#[async_trait]
impl CodeDispatcher for EmailCodeDispatcher {
    fn channel(&self) -> Channel {
        Channel::Email
    }

    async fn dispatch(&self, message: &OutboundCode) -> Result<String, String> {
        self.service
            .send_email(&code_email(message))
            .await
            .map_err(|e| {
                tracing::warn!(
                    provider = self.service.provider_name(),
                    error = %e,
                    "Email dispatch failed"
                );
                e.to_string()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::MockEmailService;

    fn outbound() -> OutboundCode {
        OutboundCode {
            recipient: "a@b.com".to_string(),
            code: "751204".to_string(),
            purpose: VerificationPurpose::Registration,
            expires_in_minutes: 5,
        }
    }

    #[tokio::test]
    async fn test_dispatch_sends_code_email() {
        let mock = MockEmailService::new();
        let dispatcher = EmailCodeDispatcher::new(Arc::new(mock.clone()));

        dispatcher.dispatch(&outbound()).await.unwrap();

        let sent = mock.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@b.com");
        assert_eq!(sent[0].subject, "Verify your RealtyChance account");
        assert!(sent[0].body.contains("751204"));
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let mock = MockEmailService::new();
        mock.set_simulate_failure(true);
        let dispatcher = EmailCodeDispatcher::new(Arc::new(mock));

        assert!(dispatcher.dispatch(&outbound()).await.is_err());
    }
}
