//! Unit tests for the verification request entity

use chrono::{Duration, TimeZone, Utc};

use crate::domain::entities::verification_request::{
    VerificationRequest, DEFAULT_EXPIRATION_SECONDS, MAX_ATTEMPTS,
};
use crate::domain::value_objects::{Channel, Identifier, VerificationPurpose};

fn issue(code: &str) -> VerificationRequest {
    let issued_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    VerificationRequest::issue(
        Identifier::phone("+15551234567").unwrap(),
        VerificationPurpose::Registration,
        code,
        issued_at,
        Duration::seconds(DEFAULT_EXPIRATION_SECONDS),
        MAX_ATTEMPTS,
    )
}

#[test]
fn test_issue_sets_expiry_and_counters() {
    let request = issue("482193");

    assert_eq!(
        request.expires_at - request.issued_at,
        Duration::seconds(DEFAULT_EXPIRATION_SECONDS)
    );
    assert_eq!(request.attempts, 0);
    assert!(!request.consumed);
    assert_eq!(request.consumed_at, None);
    assert_eq!(request.channel(), Channel::Sms);
    assert_eq!(request.remaining_attempts(), MAX_ATTEMPTS);
}

#[test]
fn test_code_is_not_stored_in_plaintext() {
    let request = issue("482193");

    assert_ne!(request.code_hash, "482193");
    assert_eq!(request.code_hash.len(), 64);
    assert!(request.matches("482193"));
    assert!(!request.matches("482194"));
    assert!(!request.matches(""));
}

#[test]
fn test_same_code_hashes_differently_per_request() {
    let first = issue("111111");
    let second = issue("111111");

    assert_ne!(first.code_hash, second.code_hash);
}

#[test]
fn test_expiry_boundary() {
    let request = issue("482193");

    assert!(!request.is_expired_at(request.expires_at));
    assert!(request.is_expired_at(request.expires_at + Duration::seconds(1)));
    assert_eq!(request.seconds_until_expiry(request.issued_at), DEFAULT_EXPIRATION_SECONDS);
    assert_eq!(request.seconds_until_expiry(request.expires_at + Duration::hours(1)), 0);
}

#[test]
fn test_attempts_exhaustion() {
    let mut request = issue("482193");
    request.attempts = MAX_ATTEMPTS - 1;
    assert!(!request.attempts_exhausted());
    assert_eq!(request.remaining_attempts(), 1);

    request.attempts = MAX_ATTEMPTS;
    assert!(request.attempts_exhausted());
    assert_eq!(request.remaining_attempts(), 0);
}
