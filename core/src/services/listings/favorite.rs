//! Per-user saved listings

use rc_shared::types::{PaginatedResponse, Pagination};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::favorite::Favorite;
use crate::domain::value_objects::Principal;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{FavoriteRepository, PropertyRepository};
use crate::services::clock::{Clock, SystemClock};

/// Favorites are private: other users, staff included, see them as missing.
pub struct FavoriteService {
    favorites: Arc<dyn FavoriteRepository>,
    properties: Arc<dyn PropertyRepository>,
    clock: Arc<dyn Clock>,
}

impl FavoriteService {
    pub fn new(
        favorites: Arc<dyn FavoriteRepository>,
        properties: Arc<dyn PropertyRepository>,
    ) -> Self {
        Self {
            favorites,
            properties,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub async fn list(
        &self,
        principal: &Principal,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<Favorite>> {
        let (results, count) = self
            .favorites
            .list_by_user(principal.user_id, pagination)
            .await?;
        Ok(PaginatedResponse::new(results, pagination, count))
    }

    pub async fn retrieve(&self, principal: &Principal, id: Uuid) -> DomainResult<Favorite> {
        self.favorites
            .find_by_id(id)
            .await?
            .filter(|f| f.user_id == principal.user_id)
            .ok_or_else(|| DomainError::not_found("favorite"))
    }

    /// Save a listing; a second save of the same listing is a conflict
    pub async fn create(&self, principal: &Principal, property_id: Uuid) -> DomainResult<Favorite> {
        self.ensure_property_exists(property_id).await?;
        self.favorites
            .create(Favorite::new(principal.user_id, property_id, self.clock.now()))
            .await
    }

    pub async fn destroy(&self, principal: &Principal, id: Uuid) -> DomainResult<()> {
        let favorite = self.retrieve(principal, id).await?;
        self.favorites.delete(favorite.id).await?;
        Ok(())
    }

    /// Idempotent save used by the listing's favorite action
    pub async fn add_for_property(
        &self,
        principal: &Principal,
        property_id: Uuid,
    ) -> DomainResult<Favorite> {
        if let Some(existing) = self
            .favorites
            .find_by_user_and_property(principal.user_id, property_id)
            .await?
        {
            return Ok(existing);
        }
        self.create(principal, property_id).await
    }

    /// Remove the caller's favorite for a listing
    pub async fn remove_for_property(
        &self,
        principal: &Principal,
        property_id: Uuid,
    ) -> DomainResult<()> {
        let favorite = self
            .favorites
            .find_by_user_and_property(principal.user_id, property_id)
            .await?
            .ok_or_else(|| DomainError::not_found("favorite"))?;
        self.favorites.delete(favorite.id).await?;
        Ok(())
    }

    async fn ensure_property_exists(&self, property_id: Uuid) -> DomainResult<()> {
        match self.properties.find_by_id(property_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("property")),
        }
    }
}
