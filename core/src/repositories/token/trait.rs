//! Refresh token repository trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken entity persistence operations
///
/// This trait defines the contract for managing refresh tokens.
///
/// # Security Considerations
/// - Only token hashes are stored, never the opaque token itself
/// - Revocation must be atomic so a token can be rotated exactly once
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its hashed value, revoked or not
    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Revoke a single token
    ///
    /// # Returns
    /// * `Ok(true)` - This call revoked the token
    /// * `Ok(false)` - The token was already revoked or does not exist
    async fn revoke_token(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Revoke every active token of a user, returning how many were revoked
    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<u64, DomainError>;

    /// Delete tokens that expired before `before`
    async fn delete_expired_tokens(&self, before: DateTime<Utc>) -> Result<u64, DomainError>;
}
