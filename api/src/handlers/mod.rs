//! Shared request handling helpers

pub mod error;
pub mod health;

pub use error::{ApiError, ApiResult};
