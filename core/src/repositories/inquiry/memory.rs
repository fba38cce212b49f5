//! In-memory implementation of InquiryRepository

use async_trait::async_trait;
use rc_shared::types::Pagination;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::inquiry::Inquiry;
use crate::errors::DomainError;

use super::trait_::InquiryRepository;

#[derive(Clone, Default)]
pub struct InMemoryInquiryRepository {
    inquiries: Arc<RwLock<HashMap<Uuid, Inquiry>>>,
}

impl InMemoryInquiryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InquiryRepository for InMemoryInquiryRepository {
    async fn create(&self, inquiry: Inquiry) -> Result<Inquiry, DomainError> {
        self.inquiries
            .write()
            .await
            .insert(inquiry.id, inquiry.clone());
        Ok(inquiry)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Inquiry>, DomainError> {
        Ok(self.inquiries.read().await.get(&id).cloned())
    }

    async fn update(&self, inquiry: Inquiry) -> Result<Inquiry, DomainError> {
        let mut inquiries = self.inquiries.write().await;
        if !inquiries.contains_key(&inquiry.id) {
            return Err(DomainError::not_found("Inquiry"));
        }
        inquiries.insert(inquiry.id, inquiry.clone());
        Ok(inquiry)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.inquiries.write().await.remove(&id).is_some())
    }

    async fn list_visible_to(
        &self,
        user_id: Option<Uuid>,
        pagination: Pagination,
    ) -> Result<(Vec<Inquiry>, u64), DomainError> {
        let inquiries = self.inquiries.read().await;
        let mut visible: Vec<&Inquiry> = inquiries
            .values()
            .filter(|i| match user_id {
                Some(user_id) => i.is_visible_to(user_id, false),
                None => true,
            })
            .collect();
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let total = visible.len() as u64;
        let page = visible
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }
}
