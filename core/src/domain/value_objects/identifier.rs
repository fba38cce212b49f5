//! Verified-possession identifiers: a phone number or an email address.

use std::fmt;

use rc_shared::utils::{email, phone};
use serde::{Deserialize, Serialize};

use crate::errors::VerificationError;

/// Delivery channel for one-time codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Sms,
    Email,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sms => "sms",
            Channel::Email => "email",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized phone number (E.164) or lower-cased email address.
///
/// Values can only be built through the validating constructors, so any
/// `Identifier` in hand is already in canonical form and safe to use as a
/// storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Phone(String),
    Email(String),
}

impl Identifier {
    /// Validate and normalize a phone number
    pub fn phone(raw: &str) -> Result<Self, VerificationError> {
        phone::normalize_phone_number(raw)
            .map(Identifier::Phone)
            .ok_or_else(|| VerificationError::InvalidIdentifier {
                value: "phone".to_string(),
            })
    }

    /// Validate and normalize an email address
    pub fn email(raw: &str) -> Result<Self, VerificationError> {
        email::normalize_email(raw)
            .map(Identifier::Email)
            .ok_or_else(|| VerificationError::InvalidIdentifier {
                value: "email".to_string(),
            })
    }

    /// Rebuild an identifier read back from storage
    pub fn from_stored(channel: Channel, value: String) -> Self {
        match channel {
            Channel::Sms => Identifier::Phone(value),
            Channel::Email => Identifier::Email(value),
        }
    }

    /// Canonical value
    pub fn value(&self) -> &str {
        match self {
            Identifier::Phone(v) | Identifier::Email(v) => v,
        }
    }

    /// Channel used to deliver codes to this identifier
    pub fn channel(&self) -> Channel {
        match self {
            Identifier::Phone(_) => Channel::Sms,
            Identifier::Email(_) => Channel::Email,
        }
    }

    /// Field name of the identifier (`phone` or `email`)
    pub fn kind(&self) -> &'static str {
        match self {
            Identifier::Phone(_) => "phone",
            Identifier::Email(_) => "email",
        }
    }

    /// Masked form safe for logs
    pub fn masked(&self) -> String {
        match self {
            Identifier::Phone(v) => phone::mask_phone_number(v),
            Identifier::Email(v) => email::mask_email(v),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_identifier_is_normalized() {
        let id = Identifier::phone("+1 555 123 4567").unwrap();
        assert_eq!(id.value(), "+15551234567");
        assert_eq!(id.channel(), Channel::Sms);
        assert_eq!(id.kind(), "phone");
    }

    #[test]
    fn test_email_identifier_is_lowercased() {
        let id = Identifier::email("A@B.com").unwrap();
        assert_eq!(id, Identifier::Email("a@b.com".to_string()));
        assert_eq!(id.channel(), Channel::Email);
    }

    #[test]
    fn test_malformed_identifiers_rejected() {
        assert_eq!(
            Identifier::phone("555-1234"),
            Err(VerificationError::InvalidIdentifier {
                value: "phone".to_string()
            })
        );
        assert!(Identifier::email("nobody").is_err());
    }

    #[test]
    fn test_display_masks_value() {
        let id = Identifier::phone("+15551234567").unwrap();
        assert_eq!(id.to_string(), "+155****4567");
    }
}
