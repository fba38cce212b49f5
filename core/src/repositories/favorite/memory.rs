//! In-memory implementation of FavoriteRepository

use async_trait::async_trait;
use rc_shared::types::Pagination;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::favorite::Favorite;
use crate::errors::DomainError;

use super::trait_::FavoriteRepository;

#[derive(Clone, Default)]
pub struct InMemoryFavoriteRepository {
    favorites: Arc<RwLock<HashMap<Uuid, Favorite>>>,
}

impl InMemoryFavoriteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepository {
    async fn create(&self, favorite: Favorite) -> Result<Favorite, DomainError> {
        let mut favorites = self.favorites.write().await;
        if favorites
            .values()
            .any(|f| f.user_id == favorite.user_id && f.property_id == favorite.property_id)
        {
            return Err(DomainError::Conflict {
                message: "Property already in favorites".to_string(),
            });
        }
        favorites.insert(favorite.id, favorite.clone());
        Ok(favorite)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Favorite>, DomainError> {
        Ok(self.favorites.read().await.get(&id).cloned())
    }

    async fn find_by_user_and_property(
        &self,
        user_id: Uuid,
        property_id: Uuid,
    ) -> Result<Option<Favorite>, DomainError> {
        let favorites = self.favorites.read().await;
        Ok(favorites
            .values()
            .find(|f| f.user_id == user_id && f.property_id == property_id)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.favorites.write().await.remove(&id).is_some())
    }

    async fn delete_by_property(&self, property_id: Uuid) -> Result<u64, DomainError> {
        let mut favorites = self.favorites.write().await;
        let initial = favorites.len();
        favorites.retain(|_, f| f.property_id != property_id);
        Ok((initial - favorites.len()) as u64)
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> Result<(Vec<Favorite>, u64), DomainError> {
        let favorites = self.favorites.read().await;
        let mut owned: Vec<&Favorite> =
            favorites.values().filter(|f| f.user_id == user_id).collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let total = owned.len() as u64;
        let page = owned
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }
}
