//! In-memory implementation of UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// User repository backed by a hash map
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Apply `change` to the stored user under the write lock
    async fn modify<F>(&self, id: Uuid, change: F) -> Result<User, DomainError>
    where
        F: FnOnce(&mut User) + Send,
    {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("User"))?;
        change(user);
        Ok(user.clone())
    }
}

fn duplicate_field(existing: &User, candidate: &User) -> Option<&'static str> {
    if existing.id == candidate.id {
        return None;
    }
    if existing.email == candidate.email {
        return Some("email");
    }
    match (&existing.phone, &candidate.phone) {
        (Some(a), Some(b)) if a == b => Some("phone"),
        _ => None,
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.phone.as_deref() == Some(phone))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if let Some(field) = users.values().find_map(|u| duplicate_field(u, &user)) {
            return Err(DomainError::Conflict {
                message: format!("{} already registered", field),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }
        if let Some(field) = users.values().find_map(|u| duplicate_field(u, &user)) {
            return Err(DomainError::Conflict {
                message: format!("{} already registered", field),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.users.write().await.remove(&id);
        Ok(())
    }

    async fn mark_email_verified(&self, id: Uuid, at: DateTime<Utc>) -> Result<User, DomainError> {
        self.modify(id, |user| user.mark_email_verified(at)).await
    }

    async fn mark_phone_verified(&self, id: Uuid, at: DateTime<Utc>) -> Result<User, DomainError> {
        self.modify(id, |user| user.mark_phone_verified(at)).await
    }

    async fn reset_password(
        &self,
        id: Uuid,
        password_hash: &str,
        at: DateTime<Utc>,
    ) -> Result<User, DomainError> {
        self.modify(id, |user| {
            user.set_password_hash(password_hash.to_string(), at);
            user.mark_phone_verified(at);
        })
        .await
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError> {
        self.modify(id, |user| user.update_last_login(at)).await.map(|_| ())
    }
}
