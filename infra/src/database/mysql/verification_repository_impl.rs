//! MySQL implementation of the VerificationRepository trait.
//!
//! The `pending_key` generated column carries a unique index that admits one
//! unconsumed request per channel and identifier. `replace_pending` deletes
//! and inserts inside one transaction, retrying when a concurrent issue for
//! the same identifier wins the race.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use rc_core::domain::entities::verification_request::VerificationRequest;
use rc_core::domain::value_objects::{Channel, Identifier};
use rc_core::errors::DomainError;
use rc_core::repositories::VerificationRepository;

use super::{column, db_error, enum_column, uuid_column};

const SELECT_REQUEST: &str = r#"
    SELECT id, channel, identifier, purpose, code_hash, attempts, max_attempts,
           issued_at, expires_at, consumed, consumed_at
    FROM verification_requests
"#;

/// Attempts at the delete+insert transaction before giving up
const REPLACE_ATTEMPTS: u32 = 3;

/// MySQL implementation of VerificationRepository
pub struct MySqlVerificationRepository {
    pool: MySqlPool,
}

impl MySqlVerificationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_request(row: &MySqlRow) -> Result<VerificationRequest, DomainError> {
        let channel = match column::<String>(row, "channel")?.as_str() {
            "sms" => Channel::Sms,
            "email" => Channel::Email,
            other => {
                return Err(DomainError::internal(format!(
                    "Unknown verification channel: {}",
                    other
                )))
            }
        };

        Ok(VerificationRequest {
            id: uuid_column(row, "id")?,
            identifier: Identifier::from_stored(channel, column(row, "identifier")?),
            purpose: enum_column(row, "purpose")?,
            code_hash: column(row, "code_hash")?,
            attempts: column(row, "attempts")?,
            max_attempts: column(row, "max_attempts")?,
            issued_at: column(row, "issued_at")?,
            expires_at: column(row, "expires_at")?,
            consumed: column(row, "consumed")?,
            consumed_at: column(row, "consumed_at")?,
        })
    }

    async fn try_replace(&self, request: &VerificationRequest) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM verification_requests
            WHERE channel = ? AND identifier = ? AND consumed = FALSE
            "#,
        )
        .bind(request.identifier.channel().as_str())
        .bind(request.identifier.value())
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO verification_requests (
                id, channel, identifier, purpose, code_hash, attempts, max_attempts,
                issued_at, expires_at, consumed, consumed_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.id.to_string())
        .bind(request.identifier.channel().as_str())
        .bind(request.identifier.value())
        .bind(request.purpose.as_str())
        .bind(&request.code_hash)
        .bind(request.attempts)
        .bind(request.max_attempts)
        .bind(request.issued_at)
        .bind(request.expires_at)
        .bind(request.consumed)
        .bind(request.consumed_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await
    }

    async fn find_one(
        &self,
        identifier: &Identifier,
        clause: &str,
    ) -> Result<Option<VerificationRequest>, DomainError> {
        let row = sqlx::query(&format!(
            "{} WHERE channel = ? AND identifier = ? AND {} LIMIT 1",
            SELECT_REQUEST, clause
        ))
        .bind(identifier.channel().as_str())
        .bind(identifier.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to load verification request"))?;

        row.as_ref().map(Self::row_to_request).transpose()
    }
}

/// Unique-key collisions and deadlocks both mean a concurrent replace won
fn is_contention(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.is_unique_violation() || db.code().as_deref() == Some("40001")
        }
        _ => false,
    }
}

#[async_trait]
impl VerificationRepository for MySqlVerificationRepository {
    async fn replace_pending(&self, request: &VerificationRequest) -> Result<(), DomainError> {
        let mut attempt = 1;
        loop {
            match self.try_replace(request).await {
                Ok(()) => return Ok(()),
                Err(e) if is_contention(&e) && attempt < REPLACE_ATTEMPTS => {
                    tracing::debug!(
                        identifier = %request.identifier.masked(),
                        attempt,
                        "Concurrent code issue, retrying replace"
                    );
                    attempt += 1;
                }
                Err(e) => return Err(db_error("Failed to store verification request")(e)),
            }
        }
    }

    async fn find_pending(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<VerificationRequest>, DomainError> {
        self.find_one(identifier, "consumed = FALSE ORDER BY issued_at DESC")
            .await
    }

    async fn find_latest_consumed(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<VerificationRequest>, DomainError> {
        self.find_one(identifier, "consumed = TRUE ORDER BY consumed_at DESC")
            .await
    }

    async fn record_failed_attempt(&self, id: Uuid) -> Result<i32, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let result =
            sqlx::query("UPDATE verification_requests SET attempts = attempts + 1 WHERE id = ?")
                .bind(id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(db_error("Failed to record attempt"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("VerificationRequest"));
        }

        let attempts: i32 =
            sqlx::query_scalar("SELECT attempts FROM verification_requests WHERE id = ?")
                .bind(id.to_string())
                .fetch_one(&mut *tx)
                .await
                .map_err(db_error("Failed to read attempts"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit attempt"))?;

        Ok(attempts)
    }

    async fn mark_consumed(
        &self,
        id: Uuid,
        consumed_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE verification_requests SET consumed = TRUE, consumed_at = ?
            WHERE id = ? AND consumed = FALSE
            "#,
        )
        .bind(consumed_at)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to consume verification request"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn revoke(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM verification_requests WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to revoke verification request"))?;
        Ok(())
    }

    async fn purge_expired(&self, before: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM verification_requests WHERE expires_at < ?")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to purge verification requests"))?;

        Ok(result.rows_affected())
    }
}
