//! New-project entity: a development under construction or about to launch.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PossessionStatus {
    ReadyToMove,
    UnderConstruction,
    Upcoming,
}

impl PossessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PossessionStatus::ReadyToMove => "ready-to-move",
            PossessionStatus::UnderConstruction => "under-construction",
            PossessionStatus::Upcoming => "upcoming",
        }
    }
}

impl std::str::FromStr for PossessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ready-to-move" => Ok(PossessionStatus::ReadyToMove),
            "under-construction" => Ok(PossessionStatus::UnderConstruction),
            "upcoming" => Ok(PossessionStatus::Upcoming),
            other => Err(format!("Unknown possession status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub developer: String,
    pub description: String,
    pub city: String,
    pub address: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub min_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub max_price: Option<Decimal>,
    pub possession_status: PossessionStatus,
    pub possession_date: Option<NaiveDate>,
    pub total_units: Option<i32>,
    pub amenities: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProjectDraft {
    pub name: String,
    pub developer: String,
    pub description: String,
    pub city: String,
    pub address: String,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub possession_status: PossessionStatus,
    pub possession_date: Option<NaiveDate>,
    pub total_units: Option<i32>,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProjectPatch {
    pub name: Option<String>,
    pub developer: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub possession_status: Option<PossessionStatus>,
    pub possession_date: Option<NaiveDate>,
    pub total_units: Option<i32>,
    pub amenities: Option<Vec<String>>,
}

impl NewProject {
    pub fn new(owner_id: Uuid, draft: NewProjectDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: draft.name,
            developer: draft.developer,
            description: draft.description,
            city: draft.city,
            address: draft.address,
            min_price: draft.min_price,
            max_price: draft.max_price,
            possession_status: draft.possession_status,
            possession_date: draft.possession_date,
            total_units: draft.total_units,
            amenities: draft.amenities,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn replace(&mut self, draft: NewProjectDraft, now: DateTime<Utc>) {
        let id = self.id;
        let owner_id = self.owner_id;
        let created_at = self.created_at;
        *self = Self::new(owner_id, draft, now);
        self.id = id;
        self.created_at = created_at;
    }

    pub fn apply(&mut self, patch: NewProjectPatch, now: DateTime<Utc>) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.developer {
            self.developer = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.city {
            self.city = v;
        }
        if let Some(v) = patch.address {
            self.address = v;
        }
        if patch.min_price.is_some() {
            self.min_price = patch.min_price;
        }
        if patch.max_price.is_some() {
            self.max_price = patch.max_price;
        }
        if let Some(v) = patch.possession_status {
            self.possession_status = v;
        }
        if patch.possession_date.is_some() {
            self.possession_date = patch.possession_date;
        }
        if patch.total_units.is_some() {
            self.total_units = patch.total_units;
        }
        if let Some(v) = patch.amenities {
            self.amenities = v;
        }
        self.updated_at = now;
    }

    /// Price band must not be inverted
    pub fn has_valid_price_range(&self) -> bool {
        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}
