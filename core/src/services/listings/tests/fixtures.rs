use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::inquiry::InquiryDraft;
use crate::domain::entities::property::{PropertyDraft, PropertyType};
use crate::domain::value_objects::Principal;
use crate::repositories::{
    InMemoryFavoriteRepository, InMemoryInquiryRepository, InMemoryNewProjectRepository,
    InMemoryPropertyRepository,
};
use crate::services::listings::{
    FavoriteService, InquiryService, NewProjectService, PropertyService,
};

pub struct Listings {
    pub properties: PropertyService,
    pub favorites: FavoriteService,
    pub inquiries: InquiryService,
    pub projects: NewProjectService,
}

pub fn listings() -> Listings {
    let property_repo = Arc::new(InMemoryPropertyRepository::new());
    let favorite_repo = Arc::new(InMemoryFavoriteRepository::new());
    Listings {
        properties: PropertyService::new(property_repo.clone(), favorite_repo.clone()),
        favorites: FavoriteService::new(favorite_repo, property_repo.clone()),
        inquiries: InquiryService::new(Arc::new(InMemoryInquiryRepository::new()), property_repo),
        projects: NewProjectService::new(Arc::new(InMemoryNewProjectRepository::new())),
    }
}

pub fn user() -> Principal {
    Principal::new(Uuid::new_v4(), false)
}

pub fn staff() -> Principal {
    Principal::new(Uuid::new_v4(), true)
}

pub fn draft(title: &str, city: &str, price: i64) -> PropertyDraft {
    PropertyDraft {
        title: title.to_string(),
        description: "Bright rooms, quiet street".to_string(),
        price: Decimal::new(price, 0),
        address: "12 Elm Street".to_string(),
        city: city.to_string(),
        state: "IL".to_string(),
        zip_code: "62701".to_string(),
        latitude: None,
        longitude: None,
        beds: 3,
        baths: 2,
        sqft: 1400,
        property_type: PropertyType::Sale,
        year_built: Some(2005),
        features: vec![],
        is_new_project: false,
    }
}

pub fn inquiry_draft(property_id: Uuid) -> InquiryDraft {
    InquiryDraft {
        property_id,
        name: "Sam Buyer".to_string(),
        email: "Sam@Example.com".to_string(),
        phone: None,
        message: "Is it still available?".to_string(),
    }
}
