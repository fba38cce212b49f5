//! Sliding-window rate limiting for code requests

mod memory;
mod traits;

pub use memory::InMemoryRateLimiter;
pub use traits::{RateLimitDecision, RateLimiter};
