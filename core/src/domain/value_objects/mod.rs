//! Value objects representing immutable domain concepts.

pub mod auth_response;
pub mod identifier;
pub mod principal;
pub mod purpose;

pub use auth_response::{AuthResponse, UserProfile};
pub use identifier::{Channel, Identifier};
pub use principal::Principal;
pub use purpose::VerificationPurpose;
