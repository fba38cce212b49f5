//! Verification request repository trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::verification_request::VerificationRequest;
use crate::domain::value_objects::Identifier;
use crate::errors::DomainError;

/// Storage for one-time code requests.
///
/// At most one unconsumed request exists per identifier. Consumed requests
/// are kept so replays can be told apart from unknown codes.
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Delete every unconsumed request for the identifier and insert `request`.
    ///
    /// Both steps happen in one transaction (or under one lock): a concurrent
    /// issuer can never leave two live codes behind.
    async fn replace_pending(&self, request: &VerificationRequest) -> Result<(), DomainError>;

    /// The unconsumed request for an identifier, if any
    async fn find_pending(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<VerificationRequest>, DomainError>;

    /// The most recently consumed request for an identifier
    async fn find_latest_consumed(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<VerificationRequest>, DomainError>;

    /// Increment the wrong-submission counter, returning the new value
    async fn record_failed_attempt(&self, id: Uuid) -> Result<i32, DomainError>;

    /// Mark a request consumed if it still is not.
    ///
    /// # Returns
    /// * `Ok(true)` - This call consumed the request
    /// * `Ok(false)` - Another caller consumed (or removed) it first
    async fn mark_consumed(&self, id: Uuid, consumed_at: DateTime<Utc>)
        -> Result<bool, DomainError>;

    /// Remove a request, used when its code could not be delivered
    async fn revoke(&self, id: Uuid) -> Result<(), DomainError>;

    /// Delete requests that expired before `before`, returning the count
    async fn purge_expired(&self, before: DateTime<Utc>) -> Result<u64, DomainError>;
}
