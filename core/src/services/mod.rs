//! Business services containing domain logic and use cases.

pub mod auth;
pub mod cleanup;
pub mod clock;
pub mod listings;
pub mod rate_limit;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use cleanup::{CleanupConfig, CleanupService};
pub use clock::{Clock, ManualClock, SystemClock};
pub use listings::{FavoriteService, InquiryService, NewProjectService, PropertyService};
pub use rate_limit::{InMemoryRateLimiter, RateLimitDecision, RateLimiter};
pub use token::{TokenService, TokenServiceConfig};
pub use verification::{
    CodeDispatcher, CodeGenerator, IssuedCode, VerificationService, VerificationServiceConfig,
};
