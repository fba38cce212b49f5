//! Inputs and outcomes of the account flows

use serde::Serialize;

use crate::domain::value_objects::{Identifier, UserProfile};
use crate::errors::{DomainResult, ValidationError};
use crate::services::verification::IssuedCode;

/// Sign-up payload
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub re_password: String,
    pub phone: Option<String>,
    pub full_name: String,
}

/// Phone or email plus password; phone wins when both are given
#[derive(Debug, Clone)]
pub struct Credentials {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

impl Credentials {
    pub fn with_phone(phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            email: None,
            password: password.into(),
        }
    }

    pub fn with_email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            phone: None,
            email: Some(email.into()),
            password: password.into(),
        }
    }

    /// Normalized identifier the caller signs in with
    pub(crate) fn identifier(&self) -> DomainResult<Identifier> {
        match (non_blank(&self.phone), non_blank(&self.email)) {
            (Some(phone), _) => Ok(Identifier::phone(phone)?),
            (None, Some(email)) => Ok(Identifier::email(email)?),
            (None, None) => Err(ValidationError::RequiredField {
                field: "phone".to_string(),
            }
            .into()),
        }
    }
}

/// Password reset confirmed by a phone OTP
#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub phone: String,
    pub code: String,
    pub password: String,
}

/// Outcome of a registration: the new profile and where its code went
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationResult {
    pub user: UserProfile,
    pub verification: IssuedCode,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
