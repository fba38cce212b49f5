//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use rc_core::domain::entities::user::User;
use rc_core::errors::DomainError;
use rc_core::repositories::UserRepository;

use super::{column, db_error, uuid_column, write_error};

const SELECT_USER: &str = r#"
    SELECT id, email, phone, full_name, password_hash,
           email_verified, phone_verified, is_active, is_staff,
           created_at, updated_at, last_login_at
    FROM users
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        Ok(User {
            id: uuid_column(row, "id")?,
            email: column(row, "email")?,
            phone: column(row, "phone")?,
            full_name: column(row, "full_name")?,
            password_hash: column(row, "password_hash")?,
            email_verified: column(row, "email_verified")?,
            phone_verified: column(row, "phone_verified")?,
            is_active: column(row, "is_active")?,
            is_staff: column(row, "is_staff")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
            last_login_at: column(row, "last_login_at")?,
        })
    }

    async fn find_one(&self, clause: &str, value: String) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE {} LIMIT 1", SELECT_USER, clause))
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to load user"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    /// Run a single-row `UPDATE` bound as `(at, id)` and reload the user
    async fn touch(
        &self,
        statement: &str,
        at: DateTime<Utc>,
        id: Uuid,
    ) -> Result<User, DomainError> {
        sqlx::query(statement)
            .bind(at)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to update user"))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one("id = ?", id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email = ?", email.to_string()).await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        self.find_one("phone = ?", phone.to_string()).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, phone, full_name, password_hash,
                email_verified, phone_verified, is_active, is_staff,
                created_at, updated_at, last_login_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.full_name)
        .bind(&user.password_hash)
        .bind(user.email_verified)
        .bind(user.phone_verified)
        .bind(user.is_active)
        .bind(user.is_staff)
        .bind(user.created_at)
        .bind(user.updated_at)
        .bind(user.last_login_at)
        .execute(&self.pool)
        .await
        .map_err(write_error(
            "Failed to create user",
            "Email or phone already registered",
        ))?;

        tracing::debug!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = ?, phone = ?, full_name = ?, password_hash = ?,
                email_verified = ?, phone_verified = ?, is_active = ?, is_staff = ?,
                updated_at = ?, last_login_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.full_name)
        .bind(&user.password_hash)
        .bind(user.email_verified)
        .bind(user.phone_verified)
        .bind(user.is_active)
        .bind(user.is_staff)
        .bind(user.updated_at)
        .bind(user.last_login_at)
        .bind(user.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(write_error(
            "Failed to update user",
            "Email or phone already registered",
        ))?;

        // MySQL reports zero affected rows when nothing changed, so confirm existence
        if result.rows_affected() == 0 && self.find_by_id(user.id).await?.is_none() {
            return Err(DomainError::not_found("User"));
        }

        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete user"))?;
        Ok(())
    }

    async fn mark_email_verified(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<User, DomainError> {
        self.touch(
            "UPDATE users SET email_verified = TRUE, updated_at = ? WHERE id = ?",
            at,
            id,
        )
        .await
    }

    async fn mark_phone_verified(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<User, DomainError> {
        self.touch(
            "UPDATE users SET phone_verified = TRUE, updated_at = ? WHERE id = ?",
            at,
            id,
        )
        .await
    }

    async fn reset_password(
        &self,
        id: Uuid,
        password_hash: &str,
        at: DateTime<Utc>,
    ) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            UPDATE users SET password_hash = ?, phone_verified = TRUE, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(password_hash)
        .bind(at)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to reset password"))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET last_login_at = ? WHERE id = ?")
            .bind(at)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to record login"))?;

        if result.rows_affected() == 0 && self.find_by_id(id).await?.is_none() {
            return Err(DomainError::not_found("User"));
        }
        Ok(())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to check email"))?;
        Ok(exists == 1)
    }

    async fn exists_by_phone(&self, phone: &str) -> Result<bool, DomainError> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE phone = ?)")
            .bind(phone)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to check phone"))?;
        Ok(exists == 1)
    }
}
