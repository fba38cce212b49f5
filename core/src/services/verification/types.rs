//! Types for verification service inputs and results

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::value_objects::{Channel, Identifier, VerificationPurpose};

/// Message handed to a dispatcher; the only place the plaintext code travels
#[derive(Debug, Clone)]
pub struct OutboundCode {
    /// Phone number or email address
    pub recipient: String,
    pub code: String,
    pub purpose: VerificationPurpose,
    /// Minutes the code stays valid, for the message text
    pub expires_in_minutes: i64,
}

/// Result of issuing a code
#[derive(Debug, Clone, Serialize)]
pub struct IssuedCode {
    pub request_id: Uuid,
    pub channel: Channel,
    pub purpose: VerificationPurpose,
    /// Masked recipient, safe to echo back to the client
    pub sent_to: String,
    pub expires_at: DateTime<Utc>,
    pub expires_in_seconds: i64,
    /// Provider message id
    #[serde(skip)]
    pub message_id: String,
}

/// Result of a successful verification
#[derive(Debug, Clone)]
pub struct VerifiedCode {
    pub request_id: Uuid,
    pub identifier: Identifier,
    pub purpose: VerificationPurpose,
    pub consumed_at: DateTime<Utc>,
}
