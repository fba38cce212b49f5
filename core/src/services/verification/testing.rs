//! Deterministic collaborators for exercising the verification flow
//! without real gateways.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::value_objects::Channel;

use super::traits::{CodeDispatcher, CodeGenerator};
use super::types::OutboundCode;

/// Dispatcher that remembers every message it was asked to send
pub struct RecordingDispatcher {
    channel: Channel,
    sent: Mutex<Vec<OutboundCode>>,
}

impl RecordingDispatcher {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Last code sent to `recipient`
    pub fn last_code_for(&self, recipient: &str) -> Option<String> {
        let sent = self.sent.lock().ok()?;
        sent.iter()
            .rev()
            .find(|m| m.recipient == recipient)
            .map(|m| m.code.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or(0)
    }
}

#[async_trait]
impl CodeDispatcher for RecordingDispatcher {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn dispatch(&self, message: &OutboundCode) -> Result<String, String> {
        let mut sent = self.sent.lock().map_err(|e| e.to_string())?;
        sent.push(message.clone());
        Ok(format!("recorded-{}", sent.len()))
    }
}

/// Dispatcher whose gateway is always down
pub struct FailingDispatcher {
    channel: Channel,
}

impl FailingDispatcher {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl CodeDispatcher for FailingDispatcher {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn dispatch(&self, _message: &OutboundCode) -> Result<String, String> {
        Err(format!("{} gateway unavailable", self.channel))
    }
}

/// Hands out pre-seeded codes in order, falling back to zeros when empty
pub struct SequenceCodeGenerator {
    codes: Mutex<VecDeque<String>>,
}

impl SequenceCodeGenerator {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: Mutex::new(codes.into_iter().map(Into::into).collect()),
        }
    }
}

impl CodeGenerator for SequenceCodeGenerator {
    fn generate(&self, length: usize) -> String {
        self.codes
            .lock()
            .ok()
            .and_then(|mut codes| codes.pop_front())
            .unwrap_or_else(|| "0".repeat(length))
    }
}
