//! Domain-specific error types for verification, authentication and validation
//!
//! Each enum exposes a `reason_code()` that the presentation layer returns
//! verbatim so clients can branch on it without parsing messages.

use thiserror::Error;

/// One-time code issuance and verification errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Invalid identifier: {value}")]
    InvalidIdentifier { value: String },

    #[error("No pending verification for this identifier")]
    NotFound,

    #[error("Verification code expired")]
    Expired,

    #[error("Verification code does not match")]
    Mismatch { remaining_attempts: i32 },

    #[error("Verification code already used")]
    AlreadyConsumed,

    #[error("Maximum attempts exceeded")]
    MaxAttemptsExceeded,

    #[error("Failed to deliver code via {channel}")]
    DispatchFailed { channel: String },

    #[error("Too many code requests, retry in {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: u64 },
}

impl VerificationError {
    pub fn reason_code(&self) -> &'static str {
        match self {
            VerificationError::InvalidIdentifier { .. } => "validation_error",
            VerificationError::NotFound => "not_found",
            VerificationError::Expired => "expired",
            VerificationError::Mismatch { .. } => "mismatch",
            VerificationError::AlreadyConsumed => "already_consumed",
            VerificationError::MaxAttemptsExceeded => "max_attempts_exceeded",
            VerificationError::DispatchFailed { .. } => "dispatch_error",
            VerificationError::RateLimited { .. } => "rate_limited",
        }
    }
}

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account has not completed verification")]
    NotVerified,

    #[error("An account with this {field} already exists")]
    AccountExists { field: String },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {min_length} characters")]
    WeakPassword { min_length: usize },

    #[error("User not found")]
    UserNotFound,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Registration disabled")]
    RegistrationDisabled,

    #[error("Authentication required")]
    AuthenticationRequired,
}

impl AuthError {
    pub fn reason_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::NotVerified => "not_verified",
            AuthError::AccountExists { .. } => "account_exists",
            AuthError::PasswordMismatch => "password_mismatch",
            AuthError::WeakPassword { .. } => "weak_password",
            AuthError::UserNotFound => "user_not_found",
            AuthError::AccountDisabled => "account_disabled",
            AuthError::RegistrationDisabled => "registration_disabled",
            AuthError::AuthenticationRequired => "authentication_required",
        }
    }
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    pub fn reason_code(&self) -> &'static str {
        match self {
            TokenError::TokenExpired => "token_expired",
            TokenError::InvalidTokenFormat => "token_invalid",
            TokenError::InvalidSignature => "token_invalid",
            TokenError::InvalidClaims => "token_invalid",
            TokenError::TokenRevoked => "token_revoked",
            TokenError::RefreshTokenExpired => "token_expired",
            TokenError::InvalidRefreshToken => "token_invalid",
            TokenError::TokenGenerationFailed => "internal_error",
        }
    }
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Out of range: {field} (min: {min}, max: {max})")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    #[error("Invalid value for {field}: {value}")]
    InvalidChoice { field: String, value: String },
}

impl ValidationError {
    pub fn reason_code(&self) -> &'static str {
        "validation_error"
    }

    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            ValidationError::RequiredField { field }
            | ValidationError::InvalidFormat { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidChoice { field, .. } => field,
        }
    }
}
