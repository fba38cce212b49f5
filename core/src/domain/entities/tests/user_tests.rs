//! Unit tests for the user entity

use chrono::{Duration, Utc};

use crate::domain::entities::user::User;
use crate::domain::value_objects::Identifier;

fn new_user() -> User {
    User::new(
        "a@b.com".to_string(),
        Some("+15551234567".to_string()),
        "Ada Buyer".to_string(),
        "hash".to_string(),
        Utc::now(),
    )
}

#[test]
fn test_new_user_is_unverified() {
    let user = new_user();

    assert!(!user.email_verified);
    assert!(!user.phone_verified);
    assert!(user.is_active);
    assert!(!user.is_staff);
    assert!(user.last_login_at.is_none());
}

#[test]
fn test_verification_is_per_identifier() {
    let mut user = new_user();
    let email = Identifier::email("a@b.com").unwrap();
    let phone = Identifier::phone("+15551234567").unwrap();

    user.mark_phone_verified(Utc::now());
    assert!(user.is_verified_for(&phone));
    assert!(!user.is_verified_for(&email));

    user.mark_email_verified(Utc::now());
    assert!(user.is_verified_for(&email));
}

#[test]
fn test_mutations_touch_updated_at() {
    let mut user = new_user();
    let later = user.updated_at + Duration::minutes(5);

    user.set_password_hash("new-hash".to_string(), later);
    assert_eq!(user.password_hash, "new-hash");
    assert_eq!(user.updated_at, later);

    user.update_last_login(later);
    assert_eq!(user.last_login_at, Some(later));
}

#[test]
fn test_password_hash_is_not_serialized() {
    let json = serde_json::to_value(new_user()).unwrap();
    assert!(json.get("password_hash").is_none());
    assert_eq!(json["email"], "a@b.com");
}
