//! In-memory implementation of VerificationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_request::VerificationRequest;
use crate::domain::value_objects::Identifier;
use crate::errors::DomainError;

use super::trait_::VerificationRepository;

/// Verification store kept in a single locked vector.
///
/// Every mutation takes the write lock once, which gives the same atomicity
/// the MySQL implementation gets from transactions and conditional updates.
#[derive(Clone, Default)]
pub struct InMemoryVerificationRepository {
    requests: Arc<RwLock<Vec<VerificationRequest>>>,
}

impl InMemoryVerificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored requests for an identifier, oldest first
    pub async fn requests_for(&self, identifier: &Identifier) -> Vec<VerificationRequest> {
        let requests = self.requests.read().await;
        requests
            .iter()
            .filter(|r| &r.identifier == identifier)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl VerificationRepository for InMemoryVerificationRepository {
    async fn replace_pending(&self, request: &VerificationRequest) -> Result<(), DomainError> {
        let mut requests = self.requests.write().await;
        requests.retain(|r| r.consumed || r.identifier != request.identifier);
        requests.push(request.clone());
        Ok(())
    }

    async fn find_pending(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<VerificationRequest>, DomainError> {
        let requests = self.requests.read().await;
        Ok(requests
            .iter()
            .filter(|r| !r.consumed && &r.identifier == identifier)
            .max_by_key(|r| r.issued_at)
            .cloned())
    }

    async fn find_latest_consumed(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<VerificationRequest>, DomainError> {
        let requests = self.requests.read().await;
        Ok(requests
            .iter()
            .filter(|r| r.consumed && &r.identifier == identifier)
            .max_by_key(|r| r.consumed_at)
            .cloned())
    }

    async fn record_failed_attempt(&self, id: Uuid) -> Result<i32, DomainError> {
        let mut requests = self.requests.write().await;
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::not_found("VerificationRequest"))?;
        request.attempts += 1;
        Ok(request.attempts)
    }

    async fn mark_consumed(
        &self,
        id: Uuid,
        consumed_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut requests = self.requests.write().await;
        match requests.iter_mut().find(|r| r.id == id) {
            Some(request) if !request.consumed => {
                request.consumed = true;
                request.consumed_at = Some(consumed_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke(&self, id: Uuid) -> Result<(), DomainError> {
        let mut requests = self.requests.write().await;
        requests.retain(|r| r.id != id);
        Ok(())
    }

    async fn purge_expired(&self, before: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut requests = self.requests.write().await;
        let initial = requests.len();
        requests.retain(|r| r.expires_at >= before);
        Ok((initial - requests.len()) as u64)
    }
}
