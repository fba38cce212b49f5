//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// International phone number regex (E.164 format, at least 8 digits)
static E164_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{7,14}$").unwrap());

/// Strip common formatting characters (spaces, dashes, dots, parentheses)
pub fn strip_formatting(phone: &str) -> String {
    phone
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect()
}

/// Normalize a phone number to E.164.
///
/// Returns `None` when the stripped value is not `+` followed by 8-15 digits
/// with a non-zero first digit.
pub fn normalize_phone_number(phone: &str) -> Option<String> {
    let stripped = strip_formatting(phone);
    if E164_REGEX.is_match(&stripped) {
        Some(stripped)
    } else {
        None
    }
}

/// Check if a phone number is valid once formatting is removed
pub fn is_valid_phone(phone: &str) -> bool {
    normalize_phone_number(phone).is_some()
}

/// Mask a phone number for logs (e.g., +155****4567)
pub fn mask_phone_number(phone: &str) -> String {
    let stripped = strip_formatting(phone);
    if stripped.len() >= 8 {
        format!("{}****{}", &stripped[0..4], &stripped[stripped.len() - 4..])
    } else {
        "****".to_string()
    }
}
