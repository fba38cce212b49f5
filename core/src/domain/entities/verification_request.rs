//! Verification request entity for phone and email one-time codes.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::value_objects::{Channel, Identifier, VerificationPurpose};

/// Maximum number of wrong submissions accepted for one code
pub const MAX_ATTEMPTS: i32 = 5;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of a code (5 minutes)
pub const DEFAULT_EXPIRATION_SECONDS: i64 = 300;

/// A one-time code issued to a phone number or email address.
///
/// The plaintext code is never stored: `code_hash` is
/// `hex(SHA-256(id || code))`, so equal codes issued to different requests
/// hash differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    /// Unique identifier for the request
    pub id: Uuid,

    /// Phone number or email the code was sent to
    pub identifier: Identifier,

    /// Flow the code may be consumed by
    pub purpose: VerificationPurpose,

    /// Salted hash of the code
    pub code_hash: String,

    /// Number of wrong submissions so far
    pub attempts: i32,

    /// Wrong submissions allowed before the code locks
    pub max_attempts: i32,

    /// Timestamp when the code was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully used
    pub consumed: bool,

    /// Timestamp of successful use
    pub consumed_at: Option<DateTime<Utc>>,
}

impl VerificationRequest {
    /// Creates a new request for `code`, valid for `ttl` from `issued_at`
    pub fn issue(
        identifier: Identifier,
        purpose: VerificationPurpose,
        code: &str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
        max_attempts: i32,
    ) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            code_hash: Self::hash_code(&id, code),
            identifier,
            purpose,
            attempts: 0,
            max_attempts,
            issued_at,
            expires_at: issued_at + ttl,
            consumed: false,
            consumed_at: None,
        }
    }

    /// Salted SHA-256 of a code, hex encoded
    pub fn hash_code(id: &Uuid, code: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(id.as_bytes());
        hasher.update(code.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Constant-time comparison of a submitted code with the stored hash
    pub fn matches(&self, submitted: &str) -> bool {
        let candidate = Self::hash_code(&self.id, submitted);
        constant_time_eq(candidate.as_bytes(), self.code_hash.as_bytes())
    }

    /// Checks if the code has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Whether no further submissions are accepted
    pub fn attempts_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    /// Remaining wrong submissions before the code locks
    pub fn remaining_attempts(&self) -> i32 {
        (self.max_attempts - self.attempts).max(0)
    }

    /// Channel the code was delivered through
    pub fn channel(&self) -> Channel {
        self.identifier.channel()
    }

    /// Seconds of validity left at `now`
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}
