use rc_shared::types::Pagination;
use rust_decimal::Decimal;

use crate::domain::entities::property::PropertyPatch;
use crate::errors::DomainError;
use crate::repositories::PropertyFilter;

use super::fixtures::{draft, listings, staff, user};

#[tokio::test]
async fn test_owner_only_mutation() {
    let l = listings();
    let owner = user();
    let stranger = user();
    let property = l.properties.create(&owner, draft("Loft", "Austin", 300_000)).await.unwrap();

    let patch = PropertyPatch {
        price: Some(Decimal::new(280_000, 0)),
        ..Default::default()
    };
    let denied = l.properties.partial_update(&stranger, property.id, patch.clone()).await;
    assert!(matches!(denied, Err(DomainError::Forbidden { .. })));

    let updated = l.properties.partial_update(&owner, property.id, patch.clone()).await.unwrap();
    assert_eq!(updated.price, Decimal::new(280_000, 0));

    // Staff can edit anything
    assert!(l.properties.partial_update(&staff(), property.id, patch).await.is_ok());

    assert!(matches!(
        l.properties.destroy(&stranger, property.id).await,
        Err(DomainError::Forbidden { .. })
    ));
    l.properties.destroy(&owner, property.id).await.unwrap();
    assert!(matches!(
        l.properties.retrieve(property.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_retrieve_counts_views() {
    let l = listings();
    let property = l.properties.create(&user(), draft("Loft", "Austin", 300_000)).await.unwrap();

    l.properties.retrieve(property.id).await.unwrap();
    let second = l.properties.retrieve(property.id).await.unwrap();
    assert_eq!(second.view_count, 2);
}

#[tokio::test]
async fn test_search_filters_and_my_listings() {
    let l = listings();
    let owner = user();
    l.properties.create(&owner, draft("Lake house", "Austin", 500_000)).await.unwrap();
    l.properties.create(&owner, draft("Studio", "Dallas", 120_000)).await.unwrap();
    l.properties.create(&user(), draft("Cabin", "austin", 200_000)).await.unwrap();

    let filter = PropertyFilter {
        city: Some("AUSTIN".to_string()),
        max_price: Some(Decimal::new(400_000, 0)),
        ..Default::default()
    };
    let page = l.properties.list(&filter, Pagination::default()).await.unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.results[0].title, "Cabin");

    let mine = l.properties.my_listings(&owner, Pagination::new(1, 1)).await.unwrap();
    assert_eq!(mine.count, 2);
    assert_eq!(mine.results.len(), 1);
    assert!(mine.has_next);

    let inverted = PropertyFilter {
        min_price: Some(Decimal::new(10, 0)),
        max_price: Some(Decimal::new(5, 0)),
        ..Default::default()
    };
    assert!(l.properties.list(&inverted, Pagination::default()).await.is_err());
}

#[tokio::test]
async fn test_create_rejects_invalid_draft() {
    let l = listings();
    let mut bad = draft("", "Austin", 100);
    assert!(l.properties.create(&user(), bad.clone()).await.is_err());

    bad.title = "Ok".to_string();
    bad.beds = -1;
    assert!(l.properties.create(&user(), bad).await.is_err());
}

#[tokio::test]
async fn test_verify_is_staff_only() {
    let l = listings();
    let owner = user();
    let property = l.properties.create(&owner, draft("Loft", "Austin", 1)).await.unwrap();

    assert!(matches!(
        l.properties.verify(&owner, property.id).await,
        Err(DomainError::Forbidden { .. })
    ));
    assert!(l.properties.verify(&staff(), property.id).await.unwrap().is_verified);
}

#[tokio::test]
async fn test_favorites_are_idempotent_and_private() {
    let l = listings();
    let buyer = user();
    let property = l.properties.create(&user(), draft("Loft", "Austin", 1)).await.unwrap();

    let first = l.favorites.add_for_property(&buyer, property.id).await.unwrap();
    let again = l.favorites.add_for_property(&buyer, property.id).await.unwrap();
    assert_eq!(first.id, again.id);

    assert!(matches!(
        l.favorites.create(&buyer, property.id).await,
        Err(DomainError::Conflict { .. })
    ));
    assert!(matches!(
        l.favorites.retrieve(&user(), first.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert_eq!(l.favorites.list(&buyer, Pagination::default()).await.unwrap().count, 1);

    l.favorites.remove_for_property(&buyer, property.id).await.unwrap();
    assert!(l.favorites.remove_for_property(&buyer, property.id).await.is_err());
}

#[tokio::test]
async fn test_deleting_property_removes_favorites() {
    let l = listings();
    let owner = user();
    let buyer = user();
    let property = l.properties.create(&owner, draft("Loft", "Austin", 1)).await.unwrap();
    l.favorites.add_for_property(&buyer, property.id).await.unwrap();

    l.properties.destroy(&owner, property.id).await.unwrap();
    assert_eq!(l.favorites.list(&buyer, Pagination::default()).await.unwrap().count, 0);
}

#[tokio::test]
async fn test_favorite_unknown_property() {
    let l = listings();
    assert!(matches!(
        l.favorites.create(&user(), uuid::Uuid::new_v4()).await,
        Err(DomainError::NotFound { .. })
    ));
}
