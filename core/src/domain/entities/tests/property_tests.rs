//! Unit tests for the property entity

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::property::{Property, PropertyDraft, PropertyPatch, PropertyType};

fn sample_draft() -> PropertyDraft {
    PropertyDraft {
        title: "Sunny two bedroom".to_string(),
        description: "Close to the park".to_string(),
        price: Decimal::new(250_000, 0),
        address: "12 Elm Street".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip_code: "62701".to_string(),
        latitude: None,
        longitude: None,
        beds: 2,
        baths: 1,
        sqft: 900,
        property_type: PropertyType::Sale,
        year_built: Some(1998),
        features: vec!["balcony".to_string()],
        is_new_project: false,
    }
}

#[test]
fn test_new_property_defaults() {
    let owner = Uuid::new_v4();
    let property = Property::new(owner, sample_draft(), Utc::now());

    assert_eq!(property.owner_id, owner);
    assert!(!property.is_verified);
    assert!(!property.is_featured);
    assert_eq!(property.view_count, 0);
}

#[test]
fn test_patch_only_changes_given_fields() {
    let mut property = Property::new(Uuid::new_v4(), sample_draft(), Utc::now());
    let later = property.created_at + Duration::hours(1);

    property.apply(
        PropertyPatch {
            price: Some(Decimal::new(240_000, 0)),
            beds: Some(3),
            ..Default::default()
        },
        later,
    );

    assert_eq!(property.price, Decimal::new(240_000, 0));
    assert_eq!(property.beds, 3);
    assert_eq!(property.title, "Sunny two bedroom");
    assert_eq!(property.year_built, Some(1998));
    assert_eq!(property.updated_at, later);
}

#[test]
fn test_replace_keeps_identity_and_moderation_flags() {
    let mut property = Property::new(Uuid::new_v4(), sample_draft(), Utc::now());
    property.is_verified = true;
    let id = property.id;

    let mut draft = sample_draft();
    draft.title = "Renovated".to_string();
    draft.property_type = PropertyType::Rent;
    property.replace(draft, Utc::now());

    assert_eq!(property.id, id);
    assert!(property.is_verified);
    assert_eq!(property.title, "Renovated");
    assert_eq!(property.property_type, PropertyType::Rent);
}

#[test]
fn test_price_serializes_as_number() {
    let property = Property::new(Uuid::new_v4(), sample_draft(), Utc::now());
    let json = serde_json::to_value(&property).unwrap();

    assert_eq!(json["price"], serde_json::json!(250000.0));
    assert_eq!(json["property_type"], "sale");
}
