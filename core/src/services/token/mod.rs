//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - JWT access token generation and verification
//! - Opaque refresh tokens stored as hashes, rotated on every use
//! - Token revocation and cleanup

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
