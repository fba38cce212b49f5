//! MySQL implementation of the TokenRepository trait.
//!
//! Only SHA-256 hashes of refresh tokens reach the database; hashing happens
//! in the token service before any call lands here.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use rc_core::domain::entities::token::RefreshToken;
use rc_core::errors::DomainError;
use rc_core::repositories::TokenRepository;

use super::{column, db_error, uuid_column, write_error};

const SELECT_TOKEN: &str = r#"
    SELECT id, user_id, token_hash, created_at, expires_at, is_revoked
    FROM refresh_tokens
"#;

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_token(row: &MySqlRow) -> Result<RefreshToken, DomainError> {
        Ok(RefreshToken {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            token_hash: column(row, "token_hash")?,
            created_at: column(row, "created_at")?,
            expires_at: column(row, "expires_at")?,
            is_revoked: column(row, "is_revoked")?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (
                id, user_id, token_hash, created_at, expires_at, is_revoked
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(token.id.to_string())
        .bind(token.user_id.to_string())
        .bind(&token.token_hash)
        .bind(token.created_at)
        .bind(token.expires_at)
        .bind(token.is_revoked)
        .execute(&self.pool)
        .await
        .map_err(write_error(
            "Failed to save refresh token",
            "Token already exists",
        ))?;

        Ok(token)
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE token_hash = ? LIMIT 1", SELECT_TOKEN))
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find refresh token"))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn revoke_token(&self, id: Uuid) -> Result<bool, DomainError> {
        // The is_revoked guard makes the update the single winner under concurrency
        let result = sqlx::query(
            "UPDATE refresh_tokens SET is_revoked = TRUE WHERE id = ? AND is_revoked = FALSE",
        )
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to revoke token"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET is_revoked = TRUE WHERE user_id = ? AND is_revoked = FALSE",
        )
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to revoke user tokens"))?;

        Ok(result.rows_affected())
    }

    async fn delete_expired_tokens(&self, before: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < ?")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete expired tokens"))?;

        Ok(result.rows_affected())
    }
}
