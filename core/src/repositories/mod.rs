//! Repository interfaces and their in-memory implementations.
//!
//! The in-memory implementations are always compiled: they back the test
//! suites and let the server run without a database.

pub mod favorite;
pub mod inquiry;
pub mod new_project;
pub mod property;
pub mod token;
pub mod user;
pub mod verification;

pub use favorite::{FavoriteRepository, InMemoryFavoriteRepository};
pub use inquiry::{InMemoryInquiryRepository, InquiryRepository};
pub use new_project::{InMemoryNewProjectRepository, NewProjectFilter, NewProjectRepository};
pub use property::{InMemoryPropertyRepository, PropertyFilter, PropertyRepository};
pub use token::{InMemoryTokenRepository, TokenRepository};
pub use user::{InMemoryUserRepository, UserRepository};
pub use verification::{InMemoryVerificationRepository, VerificationRepository};
