//! Property repository trait and search filter

use async_trait::async_trait;
use rc_shared::types::Pagination;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::property::{Property, PropertyType};
use crate::errors::DomainError;

/// Search criteria for property listings. Every field is optional and
/// criteria combine with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter {
    /// Case-insensitive match against title, description, address and city
    pub query: Option<String>,
    /// Case-insensitive exact city match
    pub city: Option<String>,
    pub property_type: Option<PropertyType>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Minimum number of bedrooms
    pub beds: Option<i32>,
    /// Minimum number of bathrooms
    pub baths: Option<i32>,
    pub min_sqft: Option<i32>,
    pub max_sqft: Option<i32>,
    pub owner_id: Option<Uuid>,
    pub featured_only: bool,
}

impl PropertyFilter {
    /// Whether a property satisfies every criterion
    pub fn matches(&self, property: &Property) -> bool {
        if let Some(query) = &self.query {
            let query = query.to_lowercase();
            let haystacks = [
                &property.title,
                &property.description,
                &property.address,
                &property.city,
            ];
            if !haystacks.iter().any(|h| h.to_lowercase().contains(&query)) {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if !property.city.eq_ignore_ascii_case(city) {
                return false;
            }
        }
        if let Some(kind) = self.property_type {
            if property.property_type != kind {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| property.price < min)
            || self.max_price.is_some_and(|max| property.price > max)
            || self.beds.is_some_and(|beds| property.beds < beds)
            || self.baths.is_some_and(|baths| property.baths < baths)
            || self.min_sqft.is_some_and(|min| property.sqft < min)
            || self.max_sqft.is_some_and(|max| property.sqft > max)
        {
            return false;
        }
        if self.owner_id.is_some_and(|owner| property.owner_id != owner) {
            return false;
        }
        !self.featured_only || property.is_featured
    }
}

/// Repository trait for Property persistence
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn create(&self, property: Property) -> Result<Property, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, DomainError>;

    /// Replace a stored property
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - Property does not exist
    async fn update(&self, property: Property) -> Result<Property, DomainError>;

    /// Delete a property, returning whether it existed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// One page of matching properties, newest first, plus the total match count
    async fn list(
        &self,
        filter: &PropertyFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Property>, u64), DomainError>;

    /// Atomically bump the view counter, returning the new value
    async fn increment_view_count(&self, id: Uuid) -> Result<i64, DomainError>;
}
