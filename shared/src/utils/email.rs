//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Trim and lower-case an email address, returning `None` if it is malformed
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_lowercase();
    if normalized.len() <= 254 && EMAIL_REGEX.is_match(&normalized) {
        Some(normalized)
    } else {
        None
    }
}

pub fn is_valid_email(email: &str) -> bool {
    normalize_email(email).is_some()
}

/// Mask an email for logs (e.g., j***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
