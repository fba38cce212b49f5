//! Fixture wiring for verification service tests

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rc_shared::config::{DispatchFailurePolicy, RateLimitConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::domain::entities::verification_request::VerificationRequest;
use crate::domain::value_objects::{Channel, Identifier};
use crate::errors::DomainError;
use crate::repositories::{InMemoryVerificationRepository, VerificationRepository};
use crate::services::clock::ManualClock;
use crate::services::rate_limit::InMemoryRateLimiter;
use crate::services::verification::testing::{
    FailingDispatcher, RecordingDispatcher, SequenceCodeGenerator,
};
use crate::services::verification::{
    CodeDispatcher, VerificationService, VerificationServiceConfig,
};

pub struct Fixture {
    pub service: VerificationService,
    pub repository: Arc<InMemoryVerificationRepository>,
    pub sms: Arc<RecordingDispatcher>,
    pub email: Arc<RecordingDispatcher>,
    pub clock: Arc<ManualClock>,
}

pub fn config() -> VerificationServiceConfig {
    VerificationServiceConfig {
        rate_limit: RateLimitConfig::disabled(),
        ..Default::default()
    }
}

pub fn fixture(codes: &[&str]) -> Fixture {
    fixture_with(codes, config())
}

pub fn fixture_with(codes: &[&str], config: VerificationServiceConfig) -> Fixture {
    let repository = Arc::new(InMemoryVerificationRepository::new());
    let sms = Arc::new(RecordingDispatcher::new(Channel::Sms));
    let email = Arc::new(RecordingDispatcher::new(Channel::Email));
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
    ));
    let limiter = Arc::new(InMemoryRateLimiter::with_clock(clock.clone()));

    let service = VerificationService::new(
        repository.clone(),
        sms.clone(),
        email.clone(),
        limiter,
        config,
    )
    .with_generator(Arc::new(SequenceCodeGenerator::new(codes.iter().copied())))
    .with_clock(clock.clone());

    Fixture {
        service,
        repository,
        sms,
        email,
        clock,
    }
}

/// Service whose SMS gateway always fails
pub fn failing_sms_service(
    policy: DispatchFailurePolicy,
) -> (VerificationService, Arc<InMemoryVerificationRepository>) {
    let repository = Arc::new(InMemoryVerificationRepository::new());
    let sms: Arc<dyn CodeDispatcher> = Arc::new(FailingDispatcher::new(Channel::Sms));
    let email: Arc<dyn CodeDispatcher> = Arc::new(RecordingDispatcher::new(Channel::Email));

    let service = VerificationService::new(
        repository.clone(),
        sms,
        email,
        Arc::new(InMemoryRateLimiter::new()),
        VerificationServiceConfig {
            dispatch_failure_policy: policy,
            ..config()
        },
    )
    .with_generator(Arc::new(SequenceCodeGenerator::new(["482193"])));

    (service, repository)
}

/// Once armed, holds the next `find_pending` after its read until released
pub struct PausingRepository {
    inner: InMemoryVerificationRepository,
    armed: AtomicBool,
    pub reached: Notify,
    pub release: Notify,
}

impl PausingRepository {
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl VerificationRepository for PausingRepository {
    async fn replace_pending(&self, request: &VerificationRequest) -> Result<(), DomainError> {
        self.inner.replace_pending(request).await
    }

    async fn find_pending(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<VerificationRequest>, DomainError> {
        let pending = self.inner.find_pending(identifier).await;
        if self.armed.swap(false, Ordering::SeqCst) {
            self.reached.notify_one();
            self.release.notified().await;
        }
        pending
    }

    async fn find_latest_consumed(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<VerificationRequest>, DomainError> {
        self.inner.find_latest_consumed(identifier).await
    }

    async fn record_failed_attempt(&self, id: Uuid) -> Result<i32, DomainError> {
        self.inner.record_failed_attempt(id).await
    }

    async fn mark_consumed(
        &self,
        id: Uuid,
        consumed_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.inner.mark_consumed(id, consumed_at).await
    }

    async fn revoke(&self, id: Uuid) -> Result<(), DomainError> {
        self.inner.revoke(id).await
    }

    async fn purge_expired(&self, before: DateTime<Utc>) -> Result<u64, DomainError> {
        self.inner.purge_expired(before).await
    }
}

/// Service over a [`PausingRepository`]
pub fn pausing_service(codes: &[&str]) -> (VerificationService, Arc<PausingRepository>) {
    let repository = Arc::new(PausingRepository {
        inner: InMemoryVerificationRepository::new(),
        armed: AtomicBool::new(false),
        reached: Notify::new(),
        release: Notify::new(),
    });

    let service = VerificationService::new(
        repository.clone(),
        Arc::new(RecordingDispatcher::new(Channel::Sms)),
        Arc::new(RecordingDispatcher::new(Channel::Email)),
        Arc::new(InMemoryRateLimiter::new()),
        config(),
    )
    .with_generator(Arc::new(SequenceCodeGenerator::new(codes.iter().copied())));

    (service, repository)
}
