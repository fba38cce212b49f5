//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims structure for the access token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Whether the user is staff
    #[serde(default)]
    pub is_staff: bool,
}

impl Claims {
    /// Creates new claims for an access token
    pub fn new_access_token(
        user_id: Uuid,
        is_staff: bool,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
        issuer: &str,
        audience: Option<&str>,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
            nbf: issued_at.timestamp(),
            iss: issuer.to_string(),
            aud: audience.map(str::to_string),
            jti: Uuid::new_v4().to_string(),
            is_staff,
        }
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Refresh token entity stored in the database
///
/// Only the SHA-256 hash of the opaque token is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: Uuid,

    /// Hashed token value
    pub token_hash: String,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been revoked
    pub is_revoked: bool,
}

impl RefreshToken {
    /// Creates a new refresh token
    pub fn new(user_id: Uuid, token_hash: String, now: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            created_at: now,
            expires_at: now + lifetime,
            is_revoked: false,
        }
    }

    /// Checks if the refresh token has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}
