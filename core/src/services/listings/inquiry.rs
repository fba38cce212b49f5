//! Buyer inquiries about a listing and their moderation

use rc_shared::types::{PaginatedResponse, Pagination};
use rc_shared::utils::email::normalize_email;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::inquiry::{Inquiry, InquiryDraft, InquiryPatch, InquiryStatus};
use crate::domain::value_objects::Principal;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{InquiryRepository, PropertyRepository};
use crate::services::clock::{Clock, SystemClock};

use super::require_text;

pub struct InquiryService {
    inquiries: Arc<dyn InquiryRepository>,
    properties: Arc<dyn PropertyRepository>,
    clock: Arc<dyn Clock>,
}

impl InquiryService {
    pub fn new(
        inquiries: Arc<dyn InquiryRepository>,
        properties: Arc<dyn PropertyRepository>,
    ) -> Self {
        Self {
            inquiries,
            properties,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Inquiries the caller sent or received; staff see all
    pub async fn list(
        &self,
        principal: &Principal,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<Inquiry>> {
        let scope = (!principal.is_staff).then_some(principal.user_id);
        let (results, count) = self.inquiries.list_visible_to(scope, pagination).await?;
        Ok(PaginatedResponse::new(results, pagination, count))
    }

    /// Invisible inquiries are reported as missing
    pub async fn retrieve(&self, principal: &Principal, id: Uuid) -> DomainResult<Inquiry> {
        self.inquiries
            .find_by_id(id)
            .await?
            .filter(|i| i.is_visible_to(principal.user_id, principal.is_staff))
            .ok_or_else(|| DomainError::not_found("inquiry"))
    }

    pub async fn create(
        &self,
        principal: &Principal,
        mut draft: InquiryDraft,
    ) -> DomainResult<Inquiry> {
        draft.email = validate_contact(&draft.name, &draft.email, &draft.message)?;
        let property = self
            .properties
            .find_by_id(draft.property_id)
            .await?
            .ok_or_else(|| DomainError::not_found("property"))?;

        let inquiry = self
            .inquiries
            .create(Inquiry::new(principal.user_id, property.owner_id, draft, self.clock.now()))
            .await?;
        tracing::info!(inquiry_id = %inquiry.id, property_id = %property.id, "Inquiry sent");
        Ok(inquiry)
    }

    /// Full replacement of the contact fields by the sender
    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        draft: InquiryDraft,
    ) -> DomainResult<Inquiry> {
        let email = validate_contact(&draft.name, &draft.email, &draft.message)?;
        let patch = InquiryPatch {
            name: Some(draft.name),
            email: Some(email),
            phone: draft.phone,
            message: Some(draft.message),
        };
        self.partial_update(principal, id, patch).await
    }

    pub async fn partial_update(
        &self,
        principal: &Principal,
        id: Uuid,
        mut patch: InquiryPatch,
    ) -> DomainResult<Inquiry> {
        let mut inquiry = self.retrieve(principal, id).await?;
        ensure_sender(principal, &inquiry)?;

        if let Some(email) = &patch.email {
            patch.email = Some(normalize_email(email).ok_or_else(|| ValidationError::InvalidFormat {
                field: "email".to_string(),
            })?);
        }
        inquiry.apply(patch, self.clock.now());
        require_text("name", &inquiry.name)?;
        require_text("message", &inquiry.message)?;
        self.inquiries.update(inquiry).await
    }

    pub async fn destroy(&self, principal: &Principal, id: Uuid) -> DomainResult<()> {
        let inquiry = self.retrieve(principal, id).await?;
        ensure_sender(principal, &inquiry)?;
        self.inquiries.delete(id).await?;
        Ok(())
    }

    pub async fn approve(&self, principal: &Principal, id: Uuid) -> DomainResult<Inquiry> {
        self.moderate(principal, id, InquiryStatus::Approved).await
    }

    pub async fn reject(&self, principal: &Principal, id: Uuid) -> DomainResult<Inquiry> {
        self.moderate(principal, id, InquiryStatus::Rejected).await
    }

    /// Only the owner of the inquired property or staff may moderate
    async fn moderate(
        &self,
        principal: &Principal,
        id: Uuid,
        status: InquiryStatus,
    ) -> DomainResult<Inquiry> {
        let mut inquiry = self.retrieve(principal, id).await?;
        if !principal.can_modify(inquiry.property_owner_id) {
            return Err(DomainError::Forbidden {
                message: "Only the property owner can moderate inquiries".to_string(),
            });
        }
        inquiry.set_status(status, self.clock.now());
        let inquiry = self.inquiries.update(inquiry).await?;
        tracing::info!(inquiry_id = %id, status = status.as_str(), "Inquiry moderated");
        Ok(inquiry)
    }
}

fn ensure_sender(principal: &Principal, inquiry: &Inquiry) -> DomainResult<()> {
    if principal.can_modify(inquiry.sender_id) {
        Ok(())
    } else {
        Err(DomainError::Forbidden {
            message: "Only the sender can change an inquiry".to_string(),
        })
    }
}

/// Returns the normalized email
fn validate_contact(name: &str, email: &str, message: &str) -> DomainResult<String> {
    require_text("name", name)?;
    require_text("message", message)?;
    normalize_email(email).ok_or_else(|| {
        ValidationError::InvalidFormat {
            field: "email".to_string(),
        }
        .into()
    })
}
