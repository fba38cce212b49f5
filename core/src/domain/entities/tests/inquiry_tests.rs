//! Unit tests for the inquiry entity

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::inquiry::{Inquiry, InquiryDraft, InquiryStatus};

#[test]
fn test_visibility_rules() {
    let sender = Uuid::new_v4();
    let owner = Uuid::new_v4();
    let inquiry = Inquiry::new(
        sender,
        owner,
        InquiryDraft {
            property_id: Uuid::new_v4(),
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            phone: None,
            message: "Is it still available?".to_string(),
        },
        Utc::now(),
    );

    assert_eq!(inquiry.status, InquiryStatus::Pending);
    assert!(inquiry.is_visible_to(sender, false));
    assert!(inquiry.is_visible_to(owner, false));
    assert!(inquiry.is_visible_to(Uuid::new_v4(), true));
    assert!(!inquiry.is_visible_to(Uuid::new_v4(), false));
}
