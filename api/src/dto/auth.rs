use rc_core::domain::entities::token::TokenPair;
use rc_core::domain::value_objects::{Identifier, VerificationPurpose};
use rc_core::errors::ValidationError;
use rc_core::services::auth::{Credentials, PasswordReset, Registration};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::handlers::ApiResult;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,

    /// Must repeat `password`
    #[validate(length(min = 1, max = 128))]
    pub re_password: String,

    /// Optional phone, any common notation; stored as E.164
    #[serde(default)]
    #[validate(length(max = 32))]
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 150))]
    pub full_name: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration {
            email: request.email,
            password: request.password,
            re_password: request.re_password,
            phone: request.phone,
            full_name: request.full_name,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyEmailOtpRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,

    #[validate(length(min = 1, max = 12))]
    pub code: String,
}

/// Either `phone` or `email`; phone wins when both are present
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendVerificationRequest {
    #[serde(default)]
    #[validate(length(max = 32))]
    pub phone: Option<String>,

    #[serde(default)]
    #[validate(length(max = 254))]
    pub email: Option<String>,

    #[serde(default)]
    pub purpose: VerificationPurpose,
}

impl SendVerificationRequest {
    /// Normalized identifier the code goes to
    pub fn identifier(&self) -> ApiResult<Identifier> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty())
        }

        match (present(&self.phone), present(&self.email)) {
            (Some(phone), _) => Ok(Identifier::phone(phone)?),
            (None, Some(email)) => Ok(Identifier::email(email)?),
            (None, None) => Err(ValidationError::RequiredField {
                field: "phone".to_string(),
            }
            .into()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyPhoneRequest {
    #[validate(length(min = 1, max = 32))]
    pub phone: String,

    #[validate(length(min = 1, max = 12))]
    pub code: String,
}

/// Credentials for `/auth/login/` and `/auth/token/`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Credentials {
            phone: request.phone,
            email: request.email,
            password: request.password,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[serde(alias = "refresh_token")]
    #[validate(length(min = 1))]
    pub refresh: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, max = 32))]
    pub phone: String,

    #[validate(length(min = 1, max = 12))]
    pub code: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

impl From<ResetPasswordRequest> for PasswordReset {
    fn from(request: ResetPasswordRequest) -> Self {
        PasswordReset {
            phone: request.phone,
            code: request.code,
            password: request.password,
        }
    }
}

/// Bare token pair, as returned by the token endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(tokens: TokenPair) -> Self {
        Self {
            access: tokens.access_token,
            refresh: tokens.refresh_token,
        }
    }
}
