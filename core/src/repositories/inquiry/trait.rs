//! Inquiry repository trait

use async_trait::async_trait;
use rc_shared::types::Pagination;
use uuid::Uuid;

use crate::domain::entities::inquiry::Inquiry;
use crate::errors::DomainError;

/// Repository trait for Inquiry persistence
#[async_trait]
pub trait InquiryRepository: Send + Sync {
    async fn create(&self, inquiry: Inquiry) -> Result<Inquiry, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Inquiry>, DomainError>;

    async fn update(&self, inquiry: Inquiry) -> Result<Inquiry, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Inquiries sent by `user_id` or addressed to a property it owns;
    /// `None` lists every inquiry (staff view). Newest first.
    async fn list_visible_to(
        &self,
        user_id: Option<Uuid>,
        pagination: Pagination,
    ) -> Result<(Vec<Inquiry>, u64), DomainError>;
}
