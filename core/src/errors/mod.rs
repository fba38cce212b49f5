//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError, ValidationError, VerificationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Machine-readable reason code surfaced to API clients
    pub fn reason_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "validation_error",
            DomainError::NotFound { .. } => "not_found",
            DomainError::Unauthorized => "unauthorized",
            DomainError::Forbidden { .. } => "forbidden",
            DomainError::Conflict { .. } => "conflict",
            DomainError::Internal { .. } => "internal_error",
            DomainError::Verification(e) => e.reason_code(),
            DomainError::Auth(e) => e.reason_code(),
            DomainError::Token(e) => e.reason_code(),
            DomainError::ValidationErr(e) => e.reason_code(),
        }
    }

    /// Shorthand for a missing resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    /// Shorthand for a storage or collaborator failure
    pub fn internal(message: impl std::fmt::Display) -> Self {
        DomainError::Internal {
            message: message.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
