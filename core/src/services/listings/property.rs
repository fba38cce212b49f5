//! Property listings

use rc_shared::types::{PaginatedResponse, Pagination};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::property::{Property, PropertyDraft, PropertyPatch};
use crate::domain::value_objects::Principal;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{FavoriteRepository, PropertyFilter, PropertyRepository};
use crate::services::clock::{Clock, SystemClock};

use super::{ensure_can_modify, require_non_negative, require_text};

pub struct PropertyService {
    properties: Arc<dyn PropertyRepository>,
    favorites: Arc<dyn FavoriteRepository>,
    clock: Arc<dyn Clock>,
}

impl PropertyService {
    pub fn new(
        properties: Arc<dyn PropertyRepository>,
        favorites: Arc<dyn FavoriteRepository>,
    ) -> Self {
        Self {
            properties,
            favorites,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Public search, newest first
    pub async fn list(
        &self,
        filter: &PropertyFilter,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<Property>> {
        if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
            if min > max {
                return Err(ValidationError::OutOfRange {
                    field: "min_price".to_string(),
                    min: "0".to_string(),
                    max: max.to_string(),
                }
                .into());
            }
        }
        let (results, count) = self.properties.list(filter, pagination).await?;
        Ok(PaginatedResponse::new(results, pagination, count))
    }

    pub async fn featured(
        &self,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<Property>> {
        let filter = PropertyFilter {
            featured_only: true,
            ..Default::default()
        };
        self.list(&filter, pagination).await
    }

    /// Listings owned by the caller
    pub async fn my_listings(
        &self,
        principal: &Principal,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<Property>> {
        let filter = PropertyFilter {
            owner_id: Some(principal.user_id),
            ..Default::default()
        };
        self.list(&filter, pagination).await
    }

    /// Fetch a listing and count the view
    pub async fn retrieve(&self, id: Uuid) -> DomainResult<Property> {
        let mut property = self.find(id).await?;
        property.view_count = self.properties.increment_view_count(id).await?;
        Ok(property)
    }

    pub async fn create(
        &self,
        principal: &Principal,
        draft: PropertyDraft,
    ) -> DomainResult<Property> {
        validate_draft(&draft)?;
        let property = self
            .properties
            .create(Property::new(principal.user_id, draft, self.clock.now()))
            .await?;
        tracing::info!(
            property_id = %property.id,
            owner_id = %principal.user_id,
            "Property listed"
        );
        Ok(property)
    }

    /// Full replacement (PUT)
    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        draft: PropertyDraft,
    ) -> DomainResult<Property> {
        validate_draft(&draft)?;
        let mut property = self.find(id).await?;
        ensure_can_modify(principal, property.owner_id, "property")?;
        property.replace(draft, self.clock.now());
        self.properties.update(property).await
    }

    /// Partial update (PATCH)
    pub async fn partial_update(
        &self,
        principal: &Principal,
        id: Uuid,
        patch: PropertyPatch,
    ) -> DomainResult<Property> {
        let mut property = self.find(id).await?;
        ensure_can_modify(principal, property.owner_id, "property")?;
        property.apply(patch, self.clock.now());

        if property.price < Decimal::ZERO {
            return Err(ValidationError::InvalidFormat {
                field: "price".to_string(),
            }
            .into());
        }
        require_text("title", &property.title)?;
        self.properties.update(property).await
    }

    /// Delete a listing together with the favorites pointing at it
    pub async fn destroy(&self, principal: &Principal, id: Uuid) -> DomainResult<()> {
        let property = self.find(id).await?;
        ensure_can_modify(principal, property.owner_id, "property")?;
        let unfavorited = self.favorites.delete_by_property(id).await?;
        self.properties.delete(id).await?;
        tracing::info!(property_id = %id, favorites_removed = unfavorited, "Property deleted");
        Ok(())
    }

    /// Staff-only verification badge
    pub async fn verify(&self, principal: &Principal, id: Uuid) -> DomainResult<Property> {
        if !principal.is_staff {
            return Err(DomainError::Forbidden {
                message: "Only staff can verify listings".to_string(),
            });
        }
        let mut property = self.find(id).await?;
        property.is_verified = true;
        property.updated_at = self.clock.now();
        let property = self.properties.update(property).await?;
        tracing::info!(property_id = %id, verified_by = %principal.user_id, "Property verified");
        Ok(property)
    }

    async fn find(&self, id: Uuid) -> DomainResult<Property> {
        self.properties
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("property"))
    }
}

fn validate_draft(draft: &PropertyDraft) -> DomainResult<()> {
    require_text("title", &draft.title)?;
    require_text("address", &draft.address)?;
    require_text("city", &draft.city)?;
    if draft.price < Decimal::ZERO {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
        }
        .into());
    }
    require_non_negative("beds", draft.beds)?;
    require_non_negative("baths", draft.baths)?;
    require_non_negative("sqft", draft.sqft)
}
