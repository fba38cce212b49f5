//! Property listing entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of transaction a property is listed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Sale,
    Rent,
    Lease,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Sale => "sale",
            PropertyType::Rent => "rent",
            PropertyType::Lease => "lease",
        }
    }
}

impl std::str::FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sale" => Ok(PropertyType::Sale),
            "rent" => Ok(PropertyType::Rent),
            "lease" => Ok(PropertyType::Lease),
            other => Err(format!("Unknown property type: {}", other)),
        }
    }
}

/// A listed property owned by the user who created it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub beds: i32,
    pub baths: i32,
    pub sqft: i32,
    pub property_type: PropertyType,
    pub year_built: Option<i32>,
    pub features: Vec<String>,
    pub is_new_project: bool,
    /// Set by staff after document checks
    pub is_verified: bool,
    pub is_featured: bool,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Owner-supplied fields of a property
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDraft {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub beds: i32,
    pub baths: i32,
    pub sqft: i32,
    pub property_type: PropertyType,
    pub year_built: Option<i32>,
    pub features: Vec<String>,
    pub is_new_project: bool,
}

/// Partial update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub beds: Option<i32>,
    pub baths: Option<i32>,
    pub sqft: Option<i32>,
    pub property_type: Option<PropertyType>,
    pub year_built: Option<i32>,
    pub features: Option<Vec<String>>,
    pub is_new_project: Option<bool>,
}

impl Property {
    pub fn new(owner_id: Uuid, draft: PropertyDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title: draft.title,
            description: draft.description,
            price: draft.price,
            address: draft.address,
            city: draft.city,
            state: draft.state,
            zip_code: draft.zip_code,
            latitude: draft.latitude,
            longitude: draft.longitude,
            beds: draft.beds,
            baths: draft.baths,
            sqft: draft.sqft,
            property_type: draft.property_type,
            year_built: draft.year_built,
            features: draft.features,
            is_new_project: draft.is_new_project,
            is_verified: false,
            is_featured: false,
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full replacement of the owner-supplied fields
    pub fn replace(&mut self, draft: PropertyDraft, now: DateTime<Utc>) {
        let PropertyDraft {
            title,
            description,
            price,
            address,
            city,
            state,
            zip_code,
            latitude,
            longitude,
            beds,
            baths,
            sqft,
            property_type,
            year_built,
            features,
            is_new_project,
        } = draft;
        self.title = title;
        self.description = description;
        self.price = price;
        self.address = address;
        self.city = city;
        self.state = state;
        self.zip_code = zip_code;
        self.latitude = latitude;
        self.longitude = longitude;
        self.beds = beds;
        self.baths = baths;
        self.sqft = sqft;
        self.property_type = property_type;
        self.year_built = year_built;
        self.features = features;
        self.is_new_project = is_new_project;
        self.updated_at = now;
    }

    pub fn apply(&mut self, patch: PropertyPatch, now: DateTime<Utc>) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.price {
            self.price = v;
        }
        if let Some(v) = patch.address {
            self.address = v;
        }
        if let Some(v) = patch.city {
            self.city = v;
        }
        if let Some(v) = patch.state {
            self.state = v;
        }
        if let Some(v) = patch.zip_code {
            self.zip_code = v;
        }
        if patch.latitude.is_some() {
            self.latitude = patch.latitude;
        }
        if patch.longitude.is_some() {
            self.longitude = patch.longitude;
        }
        if let Some(v) = patch.beds {
            self.beds = v;
        }
        if let Some(v) = patch.baths {
            self.baths = v;
        }
        if let Some(v) = patch.sqft {
            self.sqft = v;
        }
        if let Some(v) = patch.property_type {
            self.property_type = v;
        }
        if patch.year_built.is_some() {
            self.year_built = patch.year_built;
        }
        if let Some(v) = patch.features {
            self.features = v;
        }
        if let Some(v) = patch.is_new_project {
            self.is_new_project = v;
        }
        self.updated_at = now;
    }
}
