//! Listing resources: properties, inquiries, favorites and new projects.
//!
//! Reads of properties and new projects are public. Mutations require the
//! caller to own the record or be staff.

mod favorite;
mod inquiry;
mod new_project;
mod property;

#[cfg(test)]
mod tests;

pub use favorite::FavoriteService;
pub use inquiry::InquiryService;
pub use new_project::NewProjectService;
pub use property::PropertyService;

use crate::domain::value_objects::Principal;
use crate::errors::{DomainError, DomainResult, ValidationError};

fn require_text(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        }
        .into());
    }
    Ok(())
}

fn require_non_negative(field: &str, value: i32) -> DomainResult<()> {
    if value < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: i32::MAX.to_string(),
        }
        .into());
    }
    Ok(())
}

fn ensure_can_modify(
    principal: &Principal,
    owner_id: uuid::Uuid,
    resource: &str,
) -> DomainResult<()> {
    if principal.can_modify(owner_id) {
        Ok(())
    } else {
        Err(DomainError::Forbidden {
            message: format!("You do not own this {}", resource),
        })
    }
}
