//! Domain entities representing core business objects.

pub mod favorite;
pub mod inquiry;
pub mod new_project;
pub mod property;
pub mod token;
pub mod user;
pub mod verification_request;

#[cfg(test)]
mod tests;

pub use favorite::Favorite;
pub use inquiry::{Inquiry, InquiryDraft, InquiryPatch, InquiryStatus};
pub use new_project::{NewProject, NewProjectDraft, NewProjectPatch, PossessionStatus};
pub use property::{Property, PropertyDraft, PropertyPatch, PropertyType};
pub use token::{Claims, RefreshToken, TokenPair};
pub use user::User;
pub use verification_request::{
    VerificationRequest, CODE_LENGTH, DEFAULT_EXPIRATION_SECONDS, MAX_ATTEMPTS,
};
