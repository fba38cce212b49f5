//! Mock email service: records messages instead of sending them

use async_trait::async_trait;
use rc_shared::utils::email::{is_valid_email, mask_email};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

#[derive(Clone, Default)]
pub struct MockEmailService {
    simulate_failure: Arc<AtomicBool>,
    outbox: Arc<Mutex<Vec<EmailMessage>>>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        if !is_valid_email(&message.to) {
            return Err(InfrastructureError::Email(format!(
                "Invalid email address: {}",
                mask_email(&message.to)
            )));
        }
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(InfrastructureError::Email(
                "Simulated email sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        if let Ok(mut outbox) = self.outbox.lock() {
            outbox.push(message.clone());
        }

        tracing::info!(
            target: "email_service",
            provider = "mock",
            to = %mask_email(&message.to),
            subject = %message.subject,
            message_id = %message_id,
            "Email sent successfully (mock)"
        );
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(to: &str) -> EmailMessage {
        EmailMessage {
            to: to.to_string(),
            subject: "Hello".to_string(),
            body: "Body".to_string(),
        }
    }

    #[tokio::test]
    async fn test_records_sent_message() {
        let service = MockEmailService::new();
        let id = service.send_email(&message("a@b.com")).await.unwrap();

        assert!(id.starts_with("mock_"));
        assert_eq!(service.sent_messages(), vec![message("a@b.com")]);
    }

    #[tokio::test]
    async fn test_rejects_invalid_address() {
        let service = MockEmailService::new();
        assert!(service.send_email(&message("not-an-email")).await.is_err());
        assert!(service.sent_messages().is_empty());
    }
}
