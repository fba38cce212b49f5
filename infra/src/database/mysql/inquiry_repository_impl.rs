//! MySQL implementation of the InquiryRepository trait.

use async_trait::async_trait;
use rc_shared::types::Pagination;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use rc_core::domain::entities::inquiry::Inquiry;
use rc_core::errors::DomainError;
use rc_core::repositories::InquiryRepository;

use super::{column, db_error, enum_column, uuid_column};

const INQUIRY_COLUMNS: &str = r#"
    id, property_id, property_owner_id, sender_id, name, email, phone,
    message, status, created_at, updated_at
"#;

/// MySQL implementation of InquiryRepository
pub struct MySqlInquiryRepository {
    pool: MySqlPool,
}

impl MySqlInquiryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_inquiry(row: &MySqlRow) -> Result<Inquiry, DomainError> {
        Ok(Inquiry {
            id: uuid_column(row, "id")?,
            property_id: uuid_column(row, "property_id")?,
            property_owner_id: uuid_column(row, "property_owner_id")?,
            sender_id: uuid_column(row, "sender_id")?,
            name: column(row, "name")?,
            email: column(row, "email")?,
            phone: column(row, "phone")?,
            message: column(row, "message")?,
            status: enum_column(row, "status")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

/// Restrict to inquiries the user sent or received; `None` is the staff view
fn push_visibility(builder: &mut QueryBuilder<'_, MySql>, user_id: Option<Uuid>) {
    if let Some(id) = user_id {
        builder
            .push(" WHERE sender_id = ")
            .push_bind(id.to_string())
            .push(" OR property_owner_id = ")
            .push_bind(id.to_string());
    }
}

#[async_trait]
impl InquiryRepository for MySqlInquiryRepository {
    async fn create(&self, inquiry: Inquiry) -> Result<Inquiry, DomainError> {
        sqlx::query(&format!(
            "INSERT INTO inquiries ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            INQUIRY_COLUMNS
        ))
        .bind(inquiry.id.to_string())
        .bind(inquiry.property_id.to_string())
        .bind(inquiry.property_owner_id.to_string())
        .bind(inquiry.sender_id.to_string())
        .bind(&inquiry.name)
        .bind(&inquiry.email)
        .bind(&inquiry.phone)
        .bind(&inquiry.message)
        .bind(inquiry.status.as_str())
        .bind(inquiry.created_at)
        .bind(inquiry.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to create inquiry"))?;

        Ok(inquiry)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Inquiry>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM inquiries WHERE id = ? LIMIT 1",
            INQUIRY_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to load inquiry"))?;

        row.as_ref().map(Self::row_to_inquiry).transpose()
    }

    async fn update(&self, inquiry: Inquiry) -> Result<Inquiry, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE inquiries SET
                name = ?, email = ?, phone = ?, message = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&inquiry.name)
        .bind(&inquiry.email)
        .bind(&inquiry.phone)
        .bind(&inquiry.message)
        .bind(inquiry.status.as_str())
        .bind(inquiry.updated_at)
        .bind(inquiry.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update inquiry"))?;

        if result.rows_affected() == 0 && self.find_by_id(inquiry.id).await?.is_none() {
            return Err(DomainError::not_found("Inquiry"));
        }
        Ok(inquiry)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM inquiries WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete inquiry"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_visible_to(
        &self,
        user_id: Option<Uuid>,
        pagination: Pagination,
    ) -> Result<(Vec<Inquiry>, u64), DomainError> {
        let mut count = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM inquiries");
        push_visibility(&mut count, user_id);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count inquiries"))?;

        let mut select =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM inquiries", INQUIRY_COLUMNS));
        push_visibility(&mut select, user_id);
        select
            .push(" ORDER BY created_at DESC, id ASC LIMIT ")
            .push_bind(pagination.limit_i64())
            .push(" OFFSET ")
            .push_bind(pagination.offset_i64());

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list inquiries"))?;

        let inquiries = rows
            .iter()
            .map(Self::row_to_inquiry)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((inquiries, total as u64))
    }
}
