//! Main verification service implementation

use chrono::Duration;
use rc_shared::config::DispatchFailurePolicy;
use std::sync::Arc;

use crate::domain::entities::verification_request::VerificationRequest;
use crate::domain::value_objects::{Channel, Identifier, VerificationPurpose};
use crate::errors::{DomainError, DomainResult, ValidationError, VerificationError};
use crate::repositories::VerificationRepository;
use crate::services::clock::{Clock, SystemClock};
use crate::services::rate_limit::{RateLimitDecision, RateLimiter};

use super::config::VerificationServiceConfig;
use super::traits::{CodeDispatcher, CodeGenerator, RandomCodeGenerator};
use super::types::{IssuedCode, OutboundCode, VerifiedCode};

/// Verification service issuing and checking one-time codes
pub struct VerificationService {
    /// Storage for issued requests
    repository: Arc<dyn VerificationRepository>,
    /// Dispatcher for phone identifiers
    sms_dispatcher: Arc<dyn CodeDispatcher>,
    /// Dispatcher for email identifiers
    email_dispatcher: Arc<dyn CodeDispatcher>,
    /// Sliding-window limiter for code requests
    rate_limiter: Arc<dyn RateLimiter>,
    generator: Arc<dyn CodeGenerator>,
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl VerificationService {
    /// Create a new verification service with a random code generator and the
    /// system clock
    pub fn new(
        repository: Arc<dyn VerificationRepository>,
        sms_dispatcher: Arc<dyn CodeDispatcher>,
        email_dispatcher: Arc<dyn CodeDispatcher>,
        rate_limiter: Arc<dyn RateLimiter>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            repository,
            sms_dispatcher,
            email_dispatcher,
            rate_limiter,
            generator: Arc::new(RandomCodeGenerator),
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the code generator
    pub fn with_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Replace the clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue a fresh code for an identifier and deliver it.
    ///
    /// This method:
    /// 1. Applies the per-identifier and per-IP request limits
    /// 2. Generates a new code
    /// 3. Atomically replaces any outstanding code for the identifier
    /// 4. Sends the code over the identifier's channel
    ///
    /// # Errors
    ///
    /// * `VerificationError::RateLimited` - Too many requests in the window
    /// * `VerificationError::DispatchFailed` - The channel rejected the message.
    ///   Under the `revoke` policy the stored request is removed first.
    pub async fn request_code(
        &self,
        identifier: &Identifier,
        purpose: VerificationPurpose,
        client_ip: Option<&str>,
    ) -> DomainResult<IssuedCode> {
        self.enforce_rate_limits(identifier, client_ip).await?;

        let now = self.clock.now();
        let code = self.generator.generate(self.config.code_length);
        let request = VerificationRequest::issue(
            identifier.clone(),
            purpose,
            &code,
            now,
            Duration::seconds(self.config.code_ttl_seconds),
            self.config.max_attempts,
        );

        self.repository.replace_pending(&request).await.map_err(|e| {
            tracing::error!(
                identifier = %identifier,
                error = %e,
                event = "otp_storage_failed",
                "Failed to store verification request"
            );
            e
        })?;

        tracing::info!(
            identifier = %identifier,
            purpose = %purpose,
            request_id = %request.id,
            event = "otp_generated",
            "Generated new verification code"
        );

        let message = OutboundCode {
            recipient: identifier.value().to_string(),
            code,
            purpose,
            expires_in_minutes: (self.config.code_ttl_seconds + 59) / 60,
        };

        let message_id = match self.dispatcher_for(identifier.channel()).dispatch(&message).await {
            Ok(message_id) => message_id,
            Err(error) => {
                tracing::error!(
                    identifier = %identifier,
                    channel = %identifier.channel(),
                    error = %error,
                    policy = ?self.config.dispatch_failure_policy,
                    event = "otp_dispatch_failed",
                    "Failed to deliver verification code"
                );
                if self.config.dispatch_failure_policy == DispatchFailurePolicy::Revoke {
                    self.repository.revoke(request.id).await?;
                }
                return Err(VerificationError::DispatchFailed {
                    channel: identifier.channel().to_string(),
                }
                .into());
            }
        };

        tracing::info!(
            identifier = %identifier,
            message_id = %message_id,
            event = "otp_sent",
            "Verification code dispatched"
        );

        Ok(IssuedCode {
            request_id: request.id,
            channel: identifier.channel(),
            purpose,
            sent_to: identifier.masked(),
            expires_at: request.expires_at,
            expires_in_seconds: request.seconds_until_expiry(now),
            message_id,
        })
    }

    /// Check a submitted code and consume it on success.
    ///
    /// Checks run in a fixed order: pending lookup (falling back to replay
    /// detection), purpose, expiry, attempt budget, code match, then an atomic
    /// consume so two concurrent submissions cannot both succeed.
    pub async fn verify(
        &self,
        identifier: &Identifier,
        submitted_code: &str,
        purpose: VerificationPurpose,
    ) -> DomainResult<VerifiedCode> {
        let code = submitted_code.trim();
        if code.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "code".to_string(),
            }
            .into());
        }

        let now = self.clock.now();
        let request = match self.repository.find_pending(identifier).await? {
            Some(request) => request,
            None => return Err(self.missing_request_error(identifier, code, purpose).await?),
        };

        if request.purpose != purpose {
            tracing::warn!(
                identifier = %identifier,
                expected = %purpose,
                actual = %request.purpose,
                event = "otp_purpose_mismatch",
                "Code was issued for a different flow"
            );
            return Err(VerificationError::NotFound.into());
        }

        if request.is_expired_at(now) {
            tracing::info!(
                identifier = %identifier,
                event = "otp_expired",
                "Verification code expired"
            );
            return Err(VerificationError::Expired.into());
        }

        if request.attempts_exhausted() {
            return Err(VerificationError::MaxAttemptsExceeded.into());
        }

        if !request.matches(code) {
            let attempts = self.repository.record_failed_attempt(request.id).await?;
            let remaining_attempts = (request.max_attempts - attempts).max(0);
            tracing::warn!(
                identifier = %identifier,
                attempts = attempts,
                remaining_attempts = remaining_attempts,
                event = "otp_verification_failed",
                "Verification code mismatch"
            );
            return Err(VerificationError::Mismatch { remaining_attempts }.into());
        }

        if !self.repository.mark_consumed(request.id, now).await? {
            return Err(VerificationError::AlreadyConsumed.into());
        }

        tracing::info!(
            identifier = %identifier,
            request_id = %request.id,
            event = "otp_verified",
            "Verification code consumed"
        );

        Ok(VerifiedCode {
            request_id: request.id,
            identifier: identifier.clone(),
            purpose,
            consumed_at: now,
        })
    }

    /// Delete requests whose expiry lies in the past
    pub async fn purge_expired(&self) -> DomainResult<u64> {
        let purged = self.repository.purge_expired(self.clock.now()).await?;
        if purged > 0 {
            tracing::debug!(purged = purged, "Purged expired verification requests");
        }
        Ok(purged)
    }

    fn dispatcher_for(&self, channel: Channel) -> &Arc<dyn CodeDispatcher> {
        match channel {
            Channel::Sms => &self.sms_dispatcher,
            Channel::Email => &self.email_dispatcher,
        }
    }

    /// Without a pending request, a code matching the last consumed one is a
    /// replay; anything else is unknown.
    async fn missing_request_error(
        &self,
        identifier: &Identifier,
        code: &str,
        purpose: VerificationPurpose,
    ) -> DomainResult<DomainError> {
        let replay = self
            .repository
            .find_latest_consumed(identifier)
            .await?
            .is_some_and(|consumed| consumed.purpose == purpose && consumed.matches(code));

        if replay {
            tracing::warn!(
                identifier = %identifier,
                event = "otp_replay",
                "Consumed code submitted again"
            );
            Ok(VerificationError::AlreadyConsumed.into())
        } else {
            Ok(VerificationError::NotFound.into())
        }
    }

    async fn enforce_rate_limits(
        &self,
        identifier: &Identifier,
        client_ip: Option<&str>,
    ) -> DomainResult<()> {
        let limits = &self.config.rate_limit;
        if !limits.enabled {
            return Ok(());
        }

        let mut checks = vec![(
            "identifier",
            format!("otp:identifier:{}", identifier.value()),
            limits.codes_per_identifier,
        )];
        if let Some(ip) = client_ip {
            checks.push(("ip", format!("otp:ip:{}", ip), limits.codes_per_ip));
        }

        for (scope, key, limit) in checks {
            let decision = self
                .rate_limiter
                .hit(&key, limit, limits.window_seconds)
                .await
                .map_err(DomainError::internal)?;

            if let RateLimitDecision::Limited { retry_after_seconds } = decision {
                tracing::warn!(
                    identifier = %identifier,
                    scope = scope,
                    retry_after_seconds = retry_after_seconds,
                    event = "rate_limit_exceeded",
                    "Verification code request rate limit exceeded"
                );
                return Err(VerificationError::RateLimited { retry_after_seconds }.into());
            }
        }
        Ok(())
    }
}
