//! In-memory implementation of TokenRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::trait_::TokenRepository;

#[derive(Clone, Default)]
pub struct InMemoryTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, RefreshToken>>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of unrevoked tokens held for a user
    pub async fn active_count(&self, user_id: Uuid) -> usize {
        let tokens = self.tokens.read().await;
        tokens
            .values()
            .filter(|t| t.user_id == user_id && !t.is_revoked)
            .count()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;
        if tokens.values().any(|t| t.token_hash == token.token_hash) {
            return Err(DomainError::Conflict {
                message: "Refresh token already exists".to_string(),
            });
        }
        tokens.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.token_hash == token_hash).cloned())
    }

    async fn revoke_token(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;
        match tokens.get_mut(&id) {
            Some(token) if !token.is_revoked => {
                token.is_revoked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.write().await;
        let mut revoked = 0;
        for token in tokens.values_mut() {
            if token.user_id == user_id && !token.is_revoked {
                token.is_revoked = true;
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn delete_expired_tokens(&self, before: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.write().await;
        let initial = tokens.len();
        tokens.retain(|_, t| t.expires_at >= before);
        Ok((initial - tokens.len()) as u64)
    }
}
