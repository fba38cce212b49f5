//! Authentication service module
//!
//! This module provides the account flows:
//! - Registration with email OTP activation
//! - Phone verification and password reset by phone OTP
//! - Credential login and refresh token rotation

mod config;
mod service;
mod types;


pub use config::AuthServiceConfig;
pub use service::AuthService;
pub use types::{Credentials, PasswordReset, Registration, RegistrationResult};
