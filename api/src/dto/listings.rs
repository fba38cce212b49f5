//! Request bodies and query strings of the listing resources

use chrono::NaiveDate;
use rc_core::domain::entities::{
    InquiryDraft, InquiryPatch, NewProjectDraft, NewProjectPatch, PossessionStatus,
    PropertyDraft, PropertyPatch, PropertyType,
};
use rc_core::repositories::{NewProjectFilter, PropertyFilter};
use rc_shared::types::Pagination;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// `?page=&limit=` on every collection
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    #[serde(alias = "per_page")]
    pub limit: Option<u32>,
}

impl From<PageQuery> for Pagination {
    fn from(query: PageQuery) -> Self {
        Pagination::from_query(query.page, query.limit)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PropertyRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub beds: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub baths: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub sqft: i32,
    pub property_type: PropertyType,
    pub year_built: Option<i32>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_new_project: bool,
}

impl From<PropertyRequest> for PropertyDraft {
    fn from(r: PropertyRequest) -> Self {
        PropertyDraft {
            title: r.title,
            description: r.description,
            price: r.price,
            address: r.address,
            city: r.city,
            state: r.state,
            zip_code: r.zip_code,
            latitude: r.latitude,
            longitude: r.longitude,
            beds: r.beds,
            baths: r.baths,
            sqft: r.sqft,
            property_type: r.property_type,
            year_built: r.year_built,
            features: r.features,
            is_new_project: r.is_new_project,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PropertyPatchRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[validate(range(min = 0))]
    pub beds: Option<i32>,
    #[validate(range(min = 0))]
    pub baths: Option<i32>,
    #[validate(range(min = 0))]
    pub sqft: Option<i32>,
    pub property_type: Option<PropertyType>,
    pub year_built: Option<i32>,
    pub features: Option<Vec<String>>,
    pub is_new_project: Option<bool>,
}

impl From<PropertyPatchRequest> for PropertyPatch {
    fn from(r: PropertyPatchRequest) -> Self {
        PropertyPatch {
            title: r.title,
            description: r.description,
            price: r.price,
            address: r.address,
            city: r.city,
            state: r.state,
            zip_code: r.zip_code,
            latitude: r.latitude,
            longitude: r.longitude,
            beds: r.beds,
            baths: r.baths,
            sqft: r.sqft,
            property_type: r.property_type,
            year_built: r.year_built,
            features: r.features,
            is_new_project: r.is_new_project,
        }
    }
}

/// Search filters of `GET /properties/`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyQuery {
    #[serde(alias = "search")]
    pub query: Option<String>,
    pub city: Option<String>,
    pub property_type: Option<PropertyType>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub beds: Option<i32>,
    pub baths: Option<i32>,
    pub min_sqft: Option<i32>,
    pub max_sqft: Option<i32>,
}

impl From<PropertyQuery> for PropertyFilter {
    fn from(q: PropertyQuery) -> Self {
        PropertyFilter {
            query: q.query.filter(|s| !s.trim().is_empty()),
            city: q.city.filter(|s| !s.trim().is_empty()),
            property_type: q.property_type,
            min_price: q.min_price,
            max_price: q.max_price,
            beds: q.beds,
            baths: q.baths,
            min_sqft: q.min_sqft,
            max_sqft: q.max_sqft,
            owner_id: None,
            featured_only: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InquiryRequest {
    #[serde(alias = "property_id")]
    pub property: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

impl From<InquiryRequest> for InquiryDraft {
    fn from(r: InquiryRequest) -> Self {
        InquiryDraft {
            property_id: r.property,
            name: r.name,
            email: r.email,
            phone: r.phone,
            message: r.message,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct InquiryPatchRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 254))]
    pub email: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub message: Option<String>,
}

impl From<InquiryPatchRequest> for InquiryPatch {
    fn from(r: InquiryPatchRequest) -> Self {
        InquiryPatch {
            name: r.name,
            email: r.email,
            phone: r.phone,
            message: r.message,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FavoriteRequest {
    #[serde(alias = "property_id")]
    pub property: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub developer: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[serde(default)]
    pub address: String,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub possession_status: PossessionStatus,
    pub possession_date: Option<NaiveDate>,
    #[validate(range(min = 1))]
    pub total_units: Option<i32>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl From<NewProjectRequest> for NewProjectDraft {
    fn from(r: NewProjectRequest) -> Self {
        NewProjectDraft {
            name: r.name,
            developer: r.developer,
            description: r.description,
            city: r.city,
            address: r.address,
            min_price: r.min_price,
            max_price: r.max_price,
            possession_status: r.possession_status,
            possession_date: r.possession_date,
            total_units: r.total_units,
            amenities: r.amenities,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewProjectPatchRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub developer: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
    pub address: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub possession_status: Option<PossessionStatus>,
    pub possession_date: Option<NaiveDate>,
    #[validate(range(min = 1))]
    pub total_units: Option<i32>,
    pub amenities: Option<Vec<String>>,
}

impl From<NewProjectPatchRequest> for NewProjectPatch {
    fn from(r: NewProjectPatchRequest) -> Self {
        NewProjectPatch {
            name: r.name,
            developer: r.developer,
            description: r.description,
            city: r.city,
            address: r.address,
            min_price: r.min_price,
            max_price: r.max_price,
            possession_status: r.possession_status,
            possession_date: r.possession_date,
            total_units: r.total_units,
            amenities: r.amenities,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProjectQuery {
    #[serde(alias = "search")]
    pub query: Option<String>,
    pub city: Option<String>,
    pub possession_status: Option<PossessionStatus>,
}

impl From<NewProjectQuery> for NewProjectFilter {
    fn from(q: NewProjectQuery) -> Self {
        NewProjectFilter {
            query: q.query.filter(|s| !s.trim().is_empty()),
            city: q.city.filter(|s| !s.trim().is_empty()),
            possession_status: q.possession_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web::Query;

    #[test]
    fn test_property_query_from_query_string() {
        let query = Query::<PropertyQuery>::from_query(
            "city=Austin&property_type=rent&min_price=1000.50&beds=2&page=3",
        )
        .unwrap()
        .into_inner();

        let filter = PropertyFilter::from(query);
        assert_eq!(filter.city.as_deref(), Some("Austin"));
        assert_eq!(filter.property_type, Some(PropertyType::Rent));
        assert_eq!(filter.min_price, Some(Decimal::new(100050, 2)));
        assert_eq!(filter.beds, Some(2));
        assert!(!filter.featured_only);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let query = Query::<PropertyQuery>::from_query("search=%20").unwrap().into_inner();
        assert_eq!(PropertyFilter::from(query).query, None);
    }

    #[test]
    fn test_page_query_is_clamped() {
        let query = Query::<PageQuery>::from_query("page=0&per_page=500")
            .unwrap()
            .into_inner();
        let pagination = Pagination::from(query);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.limit, 100);
    }

    #[test]
    fn test_property_request_defaults_and_validation() {
        let request: PropertyRequest = serde_json::from_value(serde_json::json!({
            "title": "Loft",
            "price": 2500,
            "address": "1 Main St",
            "city": "Austin",
            "property_type": "rent",
            "beds": -1
        }))
        .unwrap();
        assert_eq!(request.sqft, 0);
        assert!(request.features.is_empty());
        assert!(request.validate().unwrap_err().field_errors().contains_key("beds"));
    }

    #[test]
    fn test_favorite_accepts_property_id_alias() {
        let id = Uuid::new_v4();
        let request: FavoriteRequest =
            serde_json::from_value(serde_json::json!({ "property_id": id })).unwrap();
        assert_eq!(request.property, id);
    }
}
