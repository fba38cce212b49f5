//! Authentication response value object for API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;

/// Public view of a user account; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub phone: Option<String>,
    pub full_name: String,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            phone: user.phone.clone(),
            full_name: user.full_name.clone(),
            email_verified: user.email_verified,
            phone_verified: user.phone_verified,
            is_staff: user.is_staff,
            created_at: user.created_at,
        }
    }
}

/// Authentication response containing tokens and the signed-in user
///
/// Field names follow the token pair convention clients already use:
/// `access` and `refresh`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access: String,

    /// Opaque refresh token for obtaining new access tokens
    pub refresh: String,

    /// Access token expiration time in seconds
    pub expires_in: i64,

    /// The authenticated user
    pub user: UserProfile,
}

impl AuthResponse {
    /// Creates an authentication response from a token pair and user
    pub fn from_token_pair(tokens: TokenPair, user: &User) -> Self {
        Self {
            access: tokens.access_token,
            refresh: tokens.refresh_token,
            expires_in: tokens.access_expires_in,
            user: UserProfile::from(user),
        }
    }
}
