//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and uses Result types for proper error handling.
//! Email and phone values passed in are already normalized.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations must enforce uniqueness of `email` and `phone`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with this id
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by normalized email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by E.164 phone number
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Conflict)` - Email or phone already registered
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError::NotFound)` - User does not exist
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user; deleting a missing user is not an error
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;

    // The writes below touch only their own columns, so flows racing on the
    // same account cannot overwrite each other's flags.

    /// Set `email_verified` and return the stored user
    async fn mark_email_verified(&self, id: Uuid, at: DateTime<Utc>) -> Result<User, DomainError>;

    /// Set `phone_verified` and return the stored user
    async fn mark_phone_verified(&self, id: Uuid, at: DateTime<Utc>) -> Result<User, DomainError>;

    /// Replace the password hash and confirm the phone the reset code went to
    async fn reset_password(
        &self,
        id: Uuid,
        password_hash: &str,
        at: DateTime<Utc>,
    ) -> Result<User, DomainError>;

    /// Stamp `last_login_at`
    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError>;

    /// Check if an email is already registered
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    /// Check if a phone number is already registered
    async fn exists_by_phone(&self, phone: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_phone(phone).await?.is_some())
    }
}
