//! MySQL implementation of the NewProjectRepository trait.

use async_trait::async_trait;
use rc_shared::types::Pagination;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use rc_core::domain::entities::new_project::NewProject;
use rc_core::errors::DomainError;
use rc_core::repositories::{NewProjectFilter, NewProjectRepository};

use super::{column, db_error, encode_list, enum_column, list_column, uuid_column};

const PROJECT_COLUMNS: &str = r#"
    id, owner_id, name, developer, description, city, address, min_price, max_price,
    possession_status, possession_date, total_units, amenities, created_at, updated_at
"#;

/// MySQL implementation of NewProjectRepository
pub struct MySqlNewProjectRepository {
    pool: MySqlPool,
}

impl MySqlNewProjectRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_project(row: &MySqlRow) -> Result<NewProject, DomainError> {
        Ok(NewProject {
            id: uuid_column(row, "id")?,
            owner_id: uuid_column(row, "owner_id")?,
            name: column(row, "name")?,
            developer: column(row, "developer")?,
            description: column(row, "description")?,
            city: column(row, "city")?,
            address: column(row, "address")?,
            min_price: column(row, "min_price")?,
            max_price: column(row, "max_price")?,
            possession_status: enum_column(row, "possession_status")?,
            possession_date: column(row, "possession_date")?,
            total_units: column(row, "total_units")?,
            amenities: list_column(row, "amenities")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, MySql>, filter: &NewProjectFilter) {
    builder.push(" WHERE 1 = 1");

    if let Some(query) = &filter.query {
        let pattern = format!("%{}%", query);
        builder.push(" AND (name LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR developer LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR description LIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }
    if let Some(city) = &filter.city {
        builder.push(" AND city = ").push_bind(city.clone());
    }
    if let Some(status) = filter.possession_status {
        builder
            .push(" AND possession_status = ")
            .push_bind(status.as_str());
    }
}

#[async_trait]
impl NewProjectRepository for MySqlNewProjectRepository {
    async fn create(&self, project: NewProject) -> Result<NewProject, DomainError> {
        sqlx::query(&format!(
            "INSERT INTO new_projects ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            PROJECT_COLUMNS
        ))
        .bind(project.id.to_string())
        .bind(project.owner_id.to_string())
        .bind(&project.name)
        .bind(&project.developer)
        .bind(&project.description)
        .bind(&project.city)
        .bind(&project.address)
        .bind(project.min_price)
        .bind(project.max_price)
        .bind(project.possession_status.as_str())
        .bind(project.possession_date)
        .bind(project.total_units)
        .bind(encode_list(&project.amenities)?)
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to create project"))?;

        Ok(project)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<NewProject>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM new_projects WHERE id = ? LIMIT 1",
            PROJECT_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to load project"))?;

        row.as_ref().map(Self::row_to_project).transpose()
    }

    async fn update(&self, project: NewProject) -> Result<NewProject, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE new_projects SET
                name = ?, developer = ?, description = ?, city = ?, address = ?,
                min_price = ?, max_price = ?, possession_status = ?, possession_date = ?,
                total_units = ?, amenities = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&project.name)
        .bind(&project.developer)
        .bind(&project.description)
        .bind(&project.city)
        .bind(&project.address)
        .bind(project.min_price)
        .bind(project.max_price)
        .bind(project.possession_status.as_str())
        .bind(project.possession_date)
        .bind(project.total_units)
        .bind(encode_list(&project.amenities)?)
        .bind(project.updated_at)
        .bind(project.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update project"))?;

        if result.rows_affected() == 0 && self.find_by_id(project.id).await?.is_none() {
            return Err(DomainError::not_found("NewProject"));
        }
        Ok(project)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM new_projects WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete project"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn list(
        &self,
        filter: &NewProjectFilter,
        pagination: Pagination,
    ) -> Result<(Vec<NewProject>, u64), DomainError> {
        let mut count = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM new_projects");
        push_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count projects"))?;

        let mut select =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM new_projects", PROJECT_COLUMNS));
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
            .map_err(db_error("Failed to list projects"))?;

        let projects = rows
            .iter()
            .map(Self::row_to_project)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((projects, total as u64))
    }
}
