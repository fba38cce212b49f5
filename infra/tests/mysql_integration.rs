//! Integration tests against a live MySQL (`DATABASE_URL`).
//!
//! Run with `cargo test -p rc_infra -- --ignored` once the database is up.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use rc_core::domain::entities::property::{Property, PropertyDraft, PropertyType};
use rc_core::domain::entities::user::User;
use rc_core::domain::entities::verification_request::VerificationRequest;
use rc_core::domain::value_objects::{Identifier, VerificationPurpose};
use rc_core::errors::DomainError;
use rc_core::repositories::{
    PropertyFilter, PropertyRepository, UserRepository, VerificationRepository,
};
use rc_infra::database::{
    DatabasePool, MySqlPropertyRepository, MySqlUserRepository, MySqlVerificationRepository,
};
use rc_shared::config::DatabaseConfig;
use rc_shared::types::Pagination;
use uuid::Uuid;

async fn pool() -> DatabasePool {
    let pool = DatabasePool::new(DatabaseConfig::from_env())
        .await
        .expect("DATABASE_URL must point at a reachable MySQL");
    pool.run_migrations().await.expect("migrations");
    pool
}

fn unique_email() -> String {
    format!("it-{}@example.com", Uuid::new_v4().simple())
}

fn unique_phone() -> String {
    let digits: String = Uuid::new_v4()
        .as_u128()
        .to_string()
        .chars()
        .take(10)
        .collect();
    format!("+1{}", digits)
}

#[tokio::test]
#[ignore] // Requires MySQL
async fn user_round_trip_and_unique_email() {
    let pool = pool().await;
    let repo = MySqlUserRepository::new(pool.get_pool().clone());

    let email = unique_email();
    let user = User::new(
        email.clone(),
        Some(unique_phone()),
        "Integration User".to_string(),
        "$2b$04$hash".to_string(),
        Utc::now(),
    );
    repo.create(user.clone()).await.unwrap();

    let loaded = repo.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(loaded.id, user.id);
    assert!(!loaded.email_verified);
    assert!(repo.exists_by_email(&email).await.unwrap());

    let duplicate = User::new(
        email,
        None,
        "Someone Else".to_string(),
        "$2b$04$hash".to_string(),
        Utc::now(),
    );
    assert!(matches!(
        repo.create(duplicate).await,
        Err(DomainError::Conflict { .. })
    ));
}

#[tokio::test]
#[ignore] // Requires MySQL
async fn verification_replace_keeps_one_pending_code() {
    let pool = pool().await;
    let repo = MySqlVerificationRepository::new(pool.get_pool().clone());
    let phone = Identifier::phone(&unique_phone()).unwrap();

    let issue = |code: &str| {
        VerificationRequest::issue(
            phone.clone(),
            VerificationPurpose::Registration,
            code,
            Utc::now(),
            Duration::minutes(5),
            5,
        )
    };

    let first = issue("111111");
    let second = issue("482193");
    repo.replace_pending(&first).await.unwrap();
    repo.replace_pending(&second).await.unwrap();

    let pending = repo.find_pending(&phone).await.unwrap().unwrap();
    assert_eq!(pending.id, second.id);

    assert_eq!(repo.record_failed_attempt(second.id).await.unwrap(), 1);
    assert!(repo.mark_consumed(second.id, Utc::now()).await.unwrap());
    assert!(!repo.mark_consumed(second.id, Utc::now()).await.unwrap());

    assert!(repo.find_pending(&phone).await.unwrap().is_none());
    let consumed = repo.find_latest_consumed(&phone).await.unwrap().unwrap();
    assert_eq!(consumed.id, second.id);
}

#[tokio::test]
#[ignore] // Requires MySQL
async fn property_filters_and_view_count() {
    let pool = pool().await;
    let users = MySqlUserRepository::new(pool.get_pool().clone());
    let properties = MySqlPropertyRepository::new(pool.get_pool().clone());

    let owner = User::new(
        unique_email(),
        None,
        "Owner".to_string(),
        "$2b$04$hash".to_string(),
        Utc::now(),
    );
    users.create(owner.clone()).await.unwrap();

    let city = format!("City{}", Uuid::new_v4().simple());
    let draft = PropertyDraft {
        title: "Sunny loft".to_string(),
        description: "Top floor".to_string(),
        price: Decimal::new(2500, 0),
        address: "1 Main St".to_string(),
        city: city.clone(),
        state: "TX".to_string(),
        zip_code: "73301".to_string(),
        latitude: None,
        longitude: None,
        beds: 2,
        baths: 1,
        sqft: 900,
        property_type: PropertyType::Rent,
        year_built: Some(2015),
        features: vec!["Balcony".to_string()],
        is_new_project: false,
    };
    let property = Property::new(owner.id, draft, Utc::now());
    properties.create(property.clone()).await.unwrap();

    let filter = PropertyFilter {
        city: Some(city.clone()),
        min_price: Some(Decimal::new(2000, 0)),
        ..Default::default()
    };
    let (page, total) = properties
        .list(&filter, Pagination::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(page[0].features, vec!["Balcony".to_string()]);

    let too_expensive = PropertyFilter {
        city: Some(city),
        min_price: Some(Decimal::new(3000, 0)),
        ..Default::default()
    };
    let (_, total) = properties
        .list(&too_expensive, Pagination::default())
        .await
        .unwrap();
    assert_eq!(total, 0);

    assert_eq!(properties.increment_view_count(property.id).await.unwrap(), 1);
    assert!(properties.delete(property.id).await.unwrap());
}
