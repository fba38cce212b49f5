//! In-memory implementation of PropertyRepository

use async_trait::async_trait;
use rc_shared::types::Pagination;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::property::Property;
use crate::errors::DomainError;

use super::trait_::{PropertyFilter, PropertyRepository};

#[derive(Clone, Default)]
pub struct InMemoryPropertyRepository {
    properties: Arc<RwLock<HashMap<Uuid, Property>>>,
}

impl InMemoryPropertyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn create(&self, property: Property) -> Result<Property, DomainError> {
        let mut properties = self.properties.write().await;
        properties.insert(property.id, property.clone());
        Ok(property)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, DomainError> {
        Ok(self.properties.read().await.get(&id).cloned())
    }

    async fn update(&self, property: Property) -> Result<Property, DomainError> {
        let mut properties = self.properties.write().await;
        if !properties.contains_key(&property.id) {
            return Err(DomainError::not_found("Property"));
        }
        properties.insert(property.id, property.clone());
        Ok(property)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.properties.write().await.remove(&id).is_some())
    }

    async fn list(
        &self,
        filter: &PropertyFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Property>, u64), DomainError> {
        let properties = self.properties.read().await;
        let mut matched: Vec<&Property> =
            properties.values().filter(|p| filter.matches(p)).collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let total = matched.len() as u64;
        let page = matched
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn increment_view_count(&self, id: Uuid) -> Result<i64, DomainError> {
        let mut properties = self.properties.write().await;
        let property = properties
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Property"))?;
        property.view_count += 1;
        Ok(property.view_count)
    }
}
