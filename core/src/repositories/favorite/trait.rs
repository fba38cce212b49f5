//! Favorite repository trait

use async_trait::async_trait;
use rc_shared::types::Pagination;
use uuid::Uuid;

use crate::domain::entities::favorite::Favorite;
use crate::errors::DomainError;

/// Repository trait for Favorite persistence
///
/// A user can favorite a given property at most once.
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Store a favorite
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - The pair is already favorited
    async fn create(&self, favorite: Favorite) -> Result<Favorite, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Favorite>, DomainError>;

    async fn find_by_user_and_property(
        &self,
        user_id: Uuid,
        property_id: Uuid,
    ) -> Result<Option<Favorite>, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Remove favorites pointing at a deleted property
    async fn delete_by_property(&self, property_id: Uuid) -> Result<u64, DomainError>;

    /// A user's favorites, newest first
    async fn list_by_user(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> Result<(Vec<Favorite>, u64), DomainError>;
}
