//! User account entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::Identifier;

/// A registered user.
///
/// Accounts start unverified. Each identifier is verified separately, and
/// login with an identifier requires that identifier to be verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Normalized (lower-cased) email address
    pub email: String,

    /// Phone number in E.164 format
    pub phone: Option<String>,

    /// Display name
    pub full_name: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the email OTP has been confirmed (account activation)
    pub email_verified: bool,

    /// Whether the phone OTP has been confirmed
    pub phone_verified: bool,

    /// Disabled accounts cannot sign in
    pub is_active: bool,

    /// Staff accounts may moderate any listing
    pub is_staff: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new, unverified user
    pub fn new(
        email: String,
        phone: Option<String>,
        full_name: String,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            phone,
            full_name,
            password_hash,
            email_verified: false,
            phone_verified: false,
            is_active: true,
            is_staff: false,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Whether the given identifier has completed verification
    pub fn is_verified_for(&self, identifier: &Identifier) -> bool {
        match identifier {
            Identifier::Email(_) => self.email_verified,
            Identifier::Phone(_) => self.phone_verified,
        }
    }

    /// Marks the email as confirmed, activating the account
    pub fn mark_email_verified(&mut self, now: DateTime<Utc>) {
        self.email_verified = true;
        self.updated_at = now;
    }

    /// Marks the phone as confirmed
    pub fn mark_phone_verified(&mut self, now: DateTime<Utc>) {
        self.phone_verified = true;
        self.updated_at = now;
    }

    /// Replaces the password hash
    pub fn set_password_hash(&mut self, password_hash: String, now: DateTime<Utc>) {
        self.password_hash = password_hash;
        self.updated_at = now;
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self, now: DateTime<Utc>) {
        self.last_login_at = Some(now);
        self.updated_at = now;
    }
}
