//! Unit tests for verification service

use chrono::Duration;
use rc_shared::config::{DispatchFailurePolicy, RateLimitConfig};

use crate::domain::value_objects::{Channel, Identifier, VerificationPurpose};
use crate::errors::{DomainError, ValidationError, VerificationError};
use crate::repositories::VerificationRepository;
use crate::services::verification::VerificationServiceConfig;

use super::mocks::{config, failing_sms_service, fixture, fixture_with, pausing_service};

const REGISTRATION: VerificationPurpose = VerificationPurpose::Registration;

fn phone() -> Identifier {
    Identifier::phone("+15551234567").unwrap()
}

fn verification_err(result: Result<impl std::fmt::Debug, DomainError>) -> VerificationError {
    match result {
        Err(DomainError::Verification(e)) => e,
        other => panic!("Expected verification error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_phone_code_round_trip_then_replay() {
    let f = fixture(&["482193"]);

    let issued = f.service.request_code(&phone(), REGISTRATION, None).await.unwrap();
    assert_eq!(issued.channel, Channel::Sms);
    assert_eq!(issued.sent_to, "+155****4567");
    assert_eq!(issued.expires_in_seconds, 300);
    assert_eq!(f.sms.last_code_for("+15551234567"), Some("482193".to_string()));

    f.clock.advance(Duration::minutes(4));
    let verified = f.service.verify(&phone(), "482193", REGISTRATION).await.unwrap();
    assert_eq!(verified.request_id, issued.request_id);

    let replay = f.service.verify(&phone(), "482193", REGISTRATION).await;
    assert_eq!(verification_err(replay), VerificationError::AlreadyConsumed);
}

#[tokio::test]
async fn test_expired_code_rejected_even_when_correct() {
    let f = fixture(&["751204", "310577"]);
    let email = Identifier::email("a@b.com").unwrap();

    f.service.request_code(&email, REGISTRATION, None).await.unwrap();
    assert_eq!(f.email.last_code_for("a@b.com"), Some("751204".to_string()));

    f.clock.advance(Duration::minutes(6));
    let result = f.service.verify(&email, "751204", REGISTRATION).await;
    assert_eq!(verification_err(result), VerificationError::Expired);

    f.service.request_code(&email, REGISTRATION, None).await.unwrap();
    assert!(f.service.verify(&email, "310577", REGISTRATION).await.is_ok());
}

#[tokio::test]
async fn test_new_code_invalidates_previous() {
    let f = fixture(&["111111", "222222"]);

    f.service.request_code(&phone(), REGISTRATION, None).await.unwrap();
    f.service.request_code(&phone(), REGISTRATION, None).await.unwrap();

    let stale = f.service.verify(&phone(), "111111", REGISTRATION).await;
    assert!(matches!(
        verification_err(stale),
        VerificationError::Mismatch { .. }
    ));
    assert!(f.service.verify(&phone(), "222222", REGISTRATION).await.is_ok());
}

#[tokio::test]
async fn test_unknown_identifier_is_not_found() {
    let f = fixture(&[]);
    let result = f.service.verify(&phone(), "123456", REGISTRATION).await;
    assert_eq!(verification_err(result), VerificationError::NotFound);
}

#[tokio::test]
async fn test_wrong_code_after_consumption_is_not_found() {
    let f = fixture(&["482193"]);
    f.service.request_code(&phone(), REGISTRATION, None).await.unwrap();
    f.service.verify(&phone(), "482193", REGISTRATION).await.unwrap();

    let result = f.service.verify(&phone(), "000000", REGISTRATION).await;
    assert_eq!(verification_err(result), VerificationError::NotFound);
}

#[tokio::test]
async fn test_purpose_mismatch_is_not_found() {
    let f = fixture(&["482193"]);
    f.service.request_code(&phone(), REGISTRATION, None).await.unwrap();

    let result = f
        .service
        .verify(&phone(), "482193", VerificationPurpose::PasswordReset)
        .await;
    assert_eq!(verification_err(result), VerificationError::NotFound);

    // The code is still usable by the flow it was issued for
    assert!(f.service.verify(&phone(), "482193", REGISTRATION).await.is_ok());
}

#[tokio::test]
async fn test_attempts_are_counted_and_capped() {
    let f = fixture_with(
        &["482193"],
        VerificationServiceConfig {
            max_attempts: 2,
            ..config()
        },
    );
    f.service.request_code(&phone(), REGISTRATION, None).await.unwrap();

    let first = f.service.verify(&phone(), "000000", REGISTRATION).await;
    assert_eq!(
        verification_err(first),
        VerificationError::Mismatch {
            remaining_attempts: 1
        }
    );
    let second = f.service.verify(&phone(), "000001", REGISTRATION).await;
    assert_eq!(
        verification_err(second),
        VerificationError::Mismatch {
            remaining_attempts: 0
        }
    );

    let locked = f.service.verify(&phone(), "482193", REGISTRATION).await;
    assert_eq!(verification_err(locked), VerificationError::MaxAttemptsExceeded);
}

#[tokio::test]
async fn test_blank_code_is_validation_error() {
    let f = fixture(&["482193"]);
    let result = f.service.verify(&phone(), "   ", REGISTRATION).await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::RequiredField { .. }))
    ));
}

#[tokio::test]
async fn test_dispatch_failure_revokes_by_default() {
    let (service, repository) = failing_sms_service(DispatchFailurePolicy::Revoke);

    let result = service.request_code(&phone(), REGISTRATION, None).await;
    assert_eq!(
        verification_err(result),
        VerificationError::DispatchFailed {
            channel: "sms".to_string()
        }
    );
    assert!(repository.find_pending(&phone()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_dispatch_failure_keep_policy_leaves_code_valid() {
    let (service, repository) = failing_sms_service(DispatchFailurePolicy::Keep);

    let result = service.request_code(&phone(), REGISTRATION, None).await;
    assert!(matches!(
        verification_err(result),
        VerificationError::DispatchFailed { .. }
    ));
    assert!(repository.find_pending(&phone()).await.unwrap().is_some());
    assert!(service.verify(&phone(), "482193", REGISTRATION).await.is_ok());
}

#[tokio::test]
async fn test_rate_limit_per_identifier() {
    let f = fixture_with(
        &[],
        VerificationServiceConfig {
            rate_limit: RateLimitConfig {
                enabled: true,
                codes_per_identifier: 2,
                codes_per_ip: 100,
                window_seconds: 3600,
            },
            ..Default::default()
        },
    );

    f.service.request_code(&phone(), REGISTRATION, None).await.unwrap();
    f.service.request_code(&phone(), REGISTRATION, None).await.unwrap();
    let limited = f.service.request_code(&phone(), REGISTRATION, None).await;
    assert_eq!(
        verification_err(limited),
        VerificationError::RateLimited {
            retry_after_seconds: 3600
        }
    );

    // Other identifiers are unaffected
    let other = Identifier::phone("+15550000000").unwrap();
    assert!(f.service.request_code(&other, REGISTRATION, None).await.is_ok());

    f.clock.advance(Duration::hours(1) + Duration::seconds(1));
    assert!(f.service.request_code(&phone(), REGISTRATION, None).await.is_ok());
}

#[tokio::test]
async fn test_rate_limit_per_ip() {
    let f = fixture_with(
        &[],
        VerificationServiceConfig {
            rate_limit: RateLimitConfig {
                enabled: true,
                codes_per_identifier: 10,
                codes_per_ip: 1,
                window_seconds: 60,
            },
            ..Default::default()
        },
    );

    let other = Identifier::phone("+15550000000").unwrap();
    f.service
        .request_code(&phone(), REGISTRATION, Some("203.0.113.7"))
        .await
        .unwrap();
    let limited = f
        .service
        .request_code(&other, REGISTRATION, Some("203.0.113.7"))
        .await;
    assert!(matches!(
        verification_err(limited),
        VerificationError::RateLimited { .. }
    ));
    assert!(f
        .service
        .request_code(&other, REGISTRATION, Some("198.51.100.1"))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_concurrent_verify_consumes_once() {
    let f = fixture(&["482193"]);
    f.service.request_code(&phone(), REGISTRATION, None).await.unwrap();
    let id = phone();

    let (a, b) = tokio::join!(
        f.service.verify(&id, "482193", REGISTRATION),
        f.service.verify(&id, "482193", REGISTRATION)
    );
    assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
}

#[tokio::test]
async fn test_code_superseded_mid_verify_is_rejected() {
    let (service, repository) = pausing_service(&["111111", "222222"]);
    let id = phone();
    service.request_code(&id, REGISTRATION, None).await.unwrap();

    // The old code is read as pending, then a new code replaces it before
    // the consume step runs.
    repository.arm();
    let (stale, reissued) = tokio::join!(service.verify(&id, "111111", REGISTRATION), async {
        repository.reached.notified().await;
        let reissued = service.request_code(&id, REGISTRATION, None).await;
        repository.release.notify_one();
        reissued
    });
    reissued.unwrap();
    assert_eq!(verification_err(stale), VerificationError::AlreadyConsumed);

    let again = service.verify(&id, "111111", REGISTRATION).await;
    assert!(matches!(
        verification_err(again),
        VerificationError::Mismatch { .. }
    ));
    assert!(service.verify(&id, "222222", REGISTRATION).await.is_ok());
}

#[tokio::test]
async fn test_purge_expired() {
    let f = fixture(&["482193"]);
    f.service.request_code(&phone(), REGISTRATION, None).await.unwrap();

    assert_eq!(f.service.purge_expired().await.unwrap(), 0);
    f.clock.advance(Duration::minutes(10));
    assert_eq!(f.service.purge_expired().await.unwrap(), 1);
    assert!(f.repository.requests_for(&phone()).await.is_empty());
}
