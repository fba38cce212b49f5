//! Verification service module for phone and email one-time codes
//!
//! This module provides the complete code workflow:
//! - Code generation and atomic replacement of any outstanding code
//! - Dispatch over SMS or email
//! - Verification with expiry, attempt tracking and replay detection
//! - Per-identifier and per-IP rate limiting

mod config;
mod service;
pub mod testing;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::{CodeDispatcher, CodeGenerator, RandomCodeGenerator};
pub use types::{IssuedCode, OutboundCode, VerifiedCode};
