use rc_shared::types::Pagination;
use rust_decimal::Decimal;

use crate::domain::entities::new_project::{NewProjectDraft, NewProjectPatch, PossessionStatus};
use crate::errors::DomainError;
use crate::repositories::NewProjectFilter;

use super::fixtures::{listings, user};

fn project(name: &str, status: PossessionStatus) -> NewProjectDraft {
    NewProjectDraft {
        name: name.to_string(),
        developer: "Northwind Builders".to_string(),
        description: "Two towers with a shared garden".to_string(),
        city: "Pune".to_string(),
        address: "Baner Road".to_string(),
        min_price: Some(Decimal::new(4_500_000, 0)),
        max_price: Some(Decimal::new(9_000_000, 0)),
        possession_status: status,
        possession_date: None,
        total_units: Some(240),
        amenities: vec!["gym".to_string()],
    }
}

#[tokio::test]
async fn test_project_lifecycle() {
    let l = listings();
    let owner = user();
    let created = l
        .projects
        .create(&owner, project("Skyline", PossessionStatus::UnderConstruction))
        .await
        .unwrap();
    l.projects
        .create(&owner, project("Greens", PossessionStatus::ReadyToMove))
        .await
        .unwrap();

    let filter = NewProjectFilter {
        possession_status: Some(PossessionStatus::ReadyToMove),
        ..Default::default()
    };
    let page = l.projects.list(&filter, Pagination::default()).await.unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.results[0].name, "Greens");

    let inverted = NewProjectPatch {
        min_price: Some(Decimal::new(10_000_000, 0)),
        ..Default::default()
    };
    assert!(matches!(
        l.projects.partial_update(&owner, created.id, inverted).await,
        Err(DomainError::ValidationErr(_))
    ));

    assert!(matches!(
        l.projects.destroy(&user(), created.id).await,
        Err(DomainError::Forbidden { .. })
    ));
    l.projects.destroy(&owner, created.id).await.unwrap();
    assert!(l.projects.retrieve(created.id).await.is_err());
}
