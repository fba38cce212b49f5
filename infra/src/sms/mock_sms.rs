//! Mock SMS Service Implementation
//!
//! Logs messages instead of sending them. Development builds use it when
//! `SMS_PROVIDER` is unset; tests use the recorded outbox.

use async_trait::async_trait;
use rc_shared::utils::phone::{is_valid_phone, mask_phone_number};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use super::sms_service::SmsService;
use crate::InfrastructureError;

/// A message captured by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub to: String,
    pub body: String,
    pub message_id: String,
}

/// Mock SMS service for development and testing
#[derive(Clone, Default)]
pub struct MockSmsService {
    message_count: Arc<AtomicU64>,
    simulate_failure: Arc<AtomicBool>,
    outbox: Arc<Mutex<Vec<SentSms>>>,
}

impl MockSmsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Messages sent so far, oldest first
    pub fn sent_messages(&self) -> Vec<SentSms> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        let masked_phone = mask_phone_number(phone_number);

        if !is_valid_phone(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                masked_phone
            )));
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(phone = %masked_phone, "Mock SMS service simulating failure");
            return Err(InfrastructureError::Sms(
                "Simulated SMS sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        self.message_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut outbox) = self.outbox.lock() {
            outbox.push(SentSms {
                to: phone_number.to_string(),
                body: message.to_string(),
                message_id: message_id.clone(),
            });
        }

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %masked_phone,
            message_id = %message_id,
            message_length = message.len(),
            "SMS sent successfully (mock)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure.load(Ordering::SeqCst)
    }
}
