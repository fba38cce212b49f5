//! MySQL implementation of the PropertyRepository trait.

use async_trait::async_trait;
use rc_shared::types::Pagination;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use rc_core::domain::entities::property::Property;
use rc_core::errors::DomainError;
use rc_core::repositories::{PropertyFilter, PropertyRepository};

use super::{column, db_error, encode_list, enum_column, list_column, uuid_column};

const PROPERTY_COLUMNS: &str = r#"
    id, owner_id, title, description, price, address, city, state, zip_code,
    latitude, longitude, beds, baths, sqft, property_type, year_built, features,
    is_new_project, is_verified, is_featured, view_count, created_at, updated_at
"#;

/// MySQL implementation of PropertyRepository
pub struct MySqlPropertyRepository {
    pool: MySqlPool,
}

impl MySqlPropertyRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_property(row: &MySqlRow) -> Result<Property, DomainError> {
        Ok(Property {
            id: uuid_column(row, "id")?,
            owner_id: uuid_column(row, "owner_id")?,
            title: column(row, "title")?,
            description: column(row, "description")?,
            price: column(row, "price")?,
            address: column(row, "address")?,
            city: column(row, "city")?,
            state: column(row, "state")?,
            zip_code: column(row, "zip_code")?,
            latitude: column(row, "latitude")?,
            longitude: column(row, "longitude")?,
            beds: column(row, "beds")?,
            baths: column(row, "baths")?,
            sqft: column(row, "sqft")?,
            property_type: enum_column(row, "property_type")?,
            year_built: column(row, "year_built")?,
            features: list_column(row, "features")?,
            is_new_project: column(row, "is_new_project")?,
            is_verified: column(row, "is_verified")?,
            is_featured: column(row, "is_featured")?,
            view_count: column(row, "view_count")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM properties WHERE id = ?)")
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to check property"))?;
        Ok(exists == 1)
    }
}

/// Append the WHERE clause for `filter`; the column collation makes text
/// comparisons case-insensitive.
fn push_filter(builder: &mut QueryBuilder<'_, MySql>, filter: &PropertyFilter) {
    builder.push(" WHERE 1 = 1");

    if let Some(query) = &filter.query {
        let pattern = format!("%{}%", query);
        builder.push(" AND (title LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR description LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR address LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR city LIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }
    if let Some(city) = &filter.city {
        builder.push(" AND city = ").push_bind(city.clone());
    }
    if let Some(kind) = filter.property_type {
        builder.push(" AND property_type = ").push_bind(kind.as_str());
    }
    if let Some(min) = filter.min_price {
        builder.push(" AND price >= ").push_bind(min);
    }
    if let Some(max) = filter.max_price {
        builder.push(" AND price <= ").push_bind(max);
    }
    if let Some(beds) = filter.beds {
        builder.push(" AND beds >= ").push_bind(beds);
    }
    if let Some(baths) = filter.baths {
        builder.push(" AND baths >= ").push_bind(baths);
    }
    if let Some(min) = filter.min_sqft {
        builder.push(" AND sqft >= ").push_bind(min);
    }
    if let Some(max) = filter.max_sqft {
        builder.push(" AND sqft <= ").push_bind(max);
    }
    if let Some(owner) = filter.owner_id {
        builder.push(" AND owner_id = ").push_bind(owner.to_string());
    }
    if filter.featured_only {
        builder.push(" AND is_featured = TRUE");
    }
}

#[async_trait]
impl PropertyRepository for MySqlPropertyRepository {
    async fn create(&self, property: Property) -> Result<Property, DomainError> {
        let placeholders = vec!["?"; PROPERTY_COLUMNS.split(',').count()].join(", ");
        sqlx::query(&format!(
            "INSERT INTO properties ({}) VALUES ({})",
            PROPERTY_COLUMNS, placeholders
        ))
        .bind(property.id.to_string())
        .bind(property.owner_id.to_string())
        .bind(&property.title)
        .bind(&property.description)
        .bind(property.price)
        .bind(&property.address)
        .bind(&property.city)
        .bind(&property.state)
        .bind(&property.zip_code)
        .bind(property.latitude)
        .bind(property.longitude)
        .bind(property.beds)
        .bind(property.baths)
        .bind(property.sqft)
        .bind(property.property_type.as_str())
        .bind(property.year_built)
        .bind(encode_list(&property.features)?)
        .bind(property.is_new_project)
        .bind(property.is_verified)
        .bind(property.is_featured)
        .bind(property.view_count)
        .bind(property.created_at)
        .bind(property.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to create property"))?;

        Ok(property)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM properties WHERE id = ? LIMIT 1",
            PROPERTY_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to load property"))?;

        row.as_ref().map(Self::row_to_property).transpose()
    }

    async fn update(&self, property: Property) -> Result<Property, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE properties SET
                title = ?, description = ?, price = ?, address = ?, city = ?, state = ?,
                zip_code = ?, latitude = ?, longitude = ?, beds = ?, baths = ?, sqft = ?,
                property_type = ?, year_built = ?, features = ?, is_new_project = ?,
                is_verified = ?, is_featured = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&property.title)
        .bind(&property.description)
        .bind(property.price)
        .bind(&property.address)
        .bind(&property.city)
        .bind(&property.state)
        .bind(&property.zip_code)
        .bind(property.latitude)
        .bind(property.longitude)
        .bind(property.beds)
        .bind(property.baths)
        .bind(property.sqft)
        .bind(property.property_type.as_str())
        .bind(property.year_built)
        .bind(encode_list(&property.features)?)
        .bind(property.is_new_project)
        .bind(property.is_verified)
        .bind(property.is_featured)
        .bind(property.updated_at)
        .bind(property.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update property"))?;

        if result.rows_affected() == 0 && !self.exists(property.id).await? {
            return Err(DomainError::not_found("Property"));
        }
        Ok(property)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM properties WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete property"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn list(
        &self,
        filter: &PropertyFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Property>, u64), DomainError> {
        let mut count = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM properties");
        push_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count properties"))?;

        let mut select =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM properties", PROPERTY_COLUMNS));
        push_filter(&mut select, filter);
        select
            .push(" ORDER BY created_at DESC, id ASC LIMIT ")
            .push_bind(pagination.limit_i64())
            .push(" OFFSET ")
            .push_bind(pagination.offset_i64());

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list properties"))?;

        let properties = rows
            .iter()
            .map(Self::row_to_property)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((properties, total as u64))
    }

    async fn increment_view_count(&self, id: Uuid) -> Result<i64, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let result = sqlx::query("UPDATE properties SET view_count = view_count + 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to increment view count"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Property"));
        }

        let views: i64 = sqlx::query_scalar("SELECT view_count FROM properties WHERE id = ?")
            .bind(id.to_string())
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("Failed to read view count"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit view count"))?;

        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rc_core::domain::entities::property::PropertyType;
    use rust_decimal::Decimal;

    #[test]
    fn test_empty_filter_matches_everything() {
        let mut builder = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM properties");
        push_filter(&mut builder, &PropertyFilter::default());
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM properties WHERE 1 = 1");
    }

    #[test]
    fn test_filter_clauses() {
        let filter = PropertyFilter {
            query: Some("loft".to_string()),
            city: Some("Austin".to_string()),
            property_type: Some(PropertyType::Rent),
            min_price: Some(Decimal::new(1000, 0)),
            featured_only: true,
            ..Default::default()
        };
        let mut builder = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM properties");
        push_filter(&mut builder, &filter);

        let sql = builder.sql();
        assert!(
            sql.contains("(title LIKE ? OR description LIKE ? OR address LIKE ? OR city LIKE ?)")
        );
        assert!(sql.contains("AND city = ?"));
        assert!(sql.contains("AND property_type = ?"));
        assert!(sql.contains("AND price >= ?"));
        assert!(sql.ends_with("AND is_featured = TRUE"));
        assert!(!sql.contains("sqft"));
    }
}
