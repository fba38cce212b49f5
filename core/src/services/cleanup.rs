//! Periodic removal of expired refresh tokens and verification requests

use std::sync::Arc;
use tracing::{error, info, warn};

use super::token::TokenService;
use super::verification::VerificationService;

/// Configuration for the cleanup task
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    pub enabled: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            enabled: true,
        }
    }
}

/// Result of a cleanup cycle
#[derive(Debug, Default)]
pub struct CleanupResult {
    pub expired_tokens_deleted: u64,
    pub expired_codes_deleted: u64,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct CleanupService {
    tokens: Arc<TokenService>,
    verification: Arc<VerificationService>,
    config: CleanupConfig,
}

impl CleanupService {
    pub fn new(
        tokens: Arc<TokenService>,
        verification: Arc<VerificationService>,
        config: CleanupConfig,
    ) -> Self {
        Self {
            tokens,
            verification,
            config,
        }
    }

    /// Run a single cleanup cycle; failures of one store do not stop the other
    pub async fn run_cleanup(&self) -> CleanupResult {
        let mut result = CleanupResult::default();

        match self.tokens.purge_expired().await {
            Ok(count) => result.expired_tokens_deleted = count,
            Err(e) => {
                error!("Failed to cleanup expired tokens: {}", e);
                result.errors.push(format!("Token cleanup error: {}", e));
            }
        }

        match self.verification.purge_expired().await {
            Ok(count) => result.expired_codes_deleted = count,
            Err(e) => {
                error!("Failed to cleanup expired verification codes: {}", e);
                result.errors.push(format!("Verification cleanup error: {}", e));
            }
        }

        info!(
            tokens = result.expired_tokens_deleted,
            codes = result.expired_codes_deleted,
            "Cleanup cycle completed"
        );
        result
    }

    /// Spawn the cleanup loop on the current tokio runtime
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Cleanup task is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);
        tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            loop {
                timer.tick().await;
                let result = self.run_cleanup().await;
                if !result.is_success() {
                    warn!("Cleanup completed with errors: {:?}", result.errors);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rc_shared::config::RateLimitConfig;
    use uuid::Uuid;

    use crate::domain::value_objects::{Channel, Identifier, VerificationPurpose};
    use crate::repositories::{InMemoryTokenRepository, InMemoryVerificationRepository};
    use crate::services::clock::ManualClock;
    use crate::services::rate_limit::InMemoryRateLimiter;
    use crate::services::token::TokenServiceConfig;
    use crate::services::verification::testing::RecordingDispatcher;
    use crate::services::verification::VerificationServiceConfig;

    #[tokio::test]
    async fn test_cleanup_purges_both_stores() {
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()));
        let tokens = Arc::new(
            TokenService::new(
                Arc::new(InMemoryTokenRepository::new()),
                TokenServiceConfig::default(),
            )
            .with_clock(clock.clone()),
        );
        let verification = Arc::new(
            VerificationService::new(
                Arc::new(InMemoryVerificationRepository::new()),
                Arc::new(RecordingDispatcher::new(Channel::Sms)),
                Arc::new(RecordingDispatcher::new(Channel::Email)),
                Arc::new(InMemoryRateLimiter::new()),
                VerificationServiceConfig {
                    rate_limit: RateLimitConfig::disabled(),
                    ..Default::default()
                },
            )
            .with_clock(clock.clone()),
        );

        tokens.generate_tokens(Uuid::new_v4(), false).await.unwrap();
        verification
            .request_code(
                &Identifier::phone("+15551234567").unwrap(),
                VerificationPurpose::Registration,
                None,
            )
            .await
            .unwrap();

        let service = CleanupService::new(tokens, verification, CleanupConfig::default());
        let first = service.run_cleanup().await;
        assert_eq!(first.expired_tokens_deleted + first.expired_codes_deleted, 0);

        clock.advance(Duration::days(8));
        let second = service.run_cleanup().await;
        assert!(second.is_success());
        assert_eq!(second.expired_tokens_deleted, 1);
        assert_eq!(second.expired_codes_deleted, 1);
    }
}
