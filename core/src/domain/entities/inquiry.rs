//! Inquiry entity: a message from a prospective buyer or tenant about a property.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Moderation state set by the property owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    Pending,
    Approved,
    Rejected,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::Pending => "pending",
            InquiryStatus::Approved => "approved",
            InquiryStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for InquiryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InquiryStatus::Pending),
            "approved" => Ok(InquiryStatus::Approved),
            "rejected" => Ok(InquiryStatus::Rejected),
            other => Err(format!("Unknown inquiry status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: Uuid,
    pub property_id: Uuid,
    /// Owner of the property at the time the inquiry was sent
    pub property_owner_id: Uuid,
    pub sender_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryDraft {
    pub property_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InquiryPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl Inquiry {
    pub fn new(
        sender_id: Uuid,
        property_owner_id: Uuid,
        draft: InquiryDraft,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id: draft.property_id,
            property_owner_id,
            sender_id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            message: draft.message,
            status: InquiryStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sender, property owner and staff may see an inquiry
    pub fn is_visible_to(&self, user_id: Uuid, is_staff: bool) -> bool {
        is_staff || self.sender_id == user_id || self.property_owner_id == user_id
    }

    pub fn apply(&mut self, patch: InquiryPatch, now: DateTime<Utc>) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if patch.phone.is_some() {
            self.phone = patch.phone;
        }
        if let Some(v) = patch.message {
            self.message = v;
        }
        self.updated_at = now;
    }

    pub fn set_status(&mut self, status: InquiryStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }
}
