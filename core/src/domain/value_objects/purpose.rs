//! Purpose a one-time code was issued for.

use serde::{Deserialize, Serialize};

/// A code issued for one purpose can never be consumed by another flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationPurpose {
    /// Confirming a phone or email during sign-up
    #[default]
    Registration,
    /// Proving phone possession before a password change
    PasswordReset,
}

impl VerificationPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationPurpose::Registration => "registration",
            VerificationPurpose::PasswordReset => "password_reset",
        }
    }
}

impl std::str::FromStr for VerificationPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registration" => Ok(VerificationPurpose::Registration),
            "password_reset" => Ok(VerificationPurpose::PasswordReset),
            other => Err(format!("Unknown verification purpose: {}", other)),
        }
    }
}

impl std::fmt::Display for VerificationPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
