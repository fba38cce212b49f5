//! MySQL implementation of the FavoriteRepository trait.

use async_trait::async_trait;
use rc_shared::types::Pagination;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use rc_core::domain::entities::favorite::Favorite;
use rc_core::errors::DomainError;
use rc_core::repositories::FavoriteRepository;

use super::{column, db_error, uuid_column, write_error};

const SELECT_FAVORITE: &str = "SELECT id, user_id, property_id, created_at FROM favorites";

/// MySQL implementation of FavoriteRepository
pub struct MySqlFavoriteRepository {
    pool: MySqlPool,
}

impl MySqlFavoriteRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_favorite(row: &MySqlRow) -> Result<Favorite, DomainError> {
        Ok(Favorite {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            property_id: uuid_column(row, "property_id")?,
            created_at: column(row, "created_at")?,
        })
    }
}

#[async_trait]
impl FavoriteRepository for MySqlFavoriteRepository {
    async fn create(&self, favorite: Favorite) -> Result<Favorite, DomainError> {
        sqlx::query(
            "INSERT INTO favorites (id, user_id, property_id, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(favorite.id.to_string())
        .bind(favorite.user_id.to_string())
        .bind(favorite.property_id.to_string())
        .bind(favorite.created_at)
        .execute(&self.pool)
        .await
        .map_err(write_error(
            "Failed to create favorite",
            "Property already in favorites",
        ))?;

        Ok(favorite)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Favorite>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = ? LIMIT 1", SELECT_FAVORITE))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to load favorite"))?;

        row.as_ref().map(Self::row_to_favorite).transpose()
    }

    async fn find_by_user_and_property(
        &self,
        user_id: Uuid,
        property_id: Uuid,
    ) -> Result<Option<Favorite>, DomainError> {
        let row = sqlx::query(&format!(
            "{} WHERE user_id = ? AND property_id = ? LIMIT 1",
            SELECT_FAVORITE
        ))
        .bind(user_id.to_string())
        .bind(property_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to load favorite"))?;

        row.as_ref().map(Self::row_to_favorite).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM favorites WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete favorite"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_by_property(&self, property_id: Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM favorites WHERE property_id = ?")
            .bind(property_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete favorites"))?;

        Ok(result.rows_affected())
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> Result<(Vec<Favorite>, u64), DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorites WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count favorites"))?;

        let rows = sqlx::query(&format!(
            "{} WHERE user_id = ? ORDER BY created_at DESC, id ASC LIMIT ? OFFSET ?",
            SELECT_FAVORITE
        ))
        .bind(user_id.to_string())
        .bind(pagination.limit_i64())
        .bind(pagination.offset_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list favorites"))?;

        let favorites = rows
            .iter()
            .map(Self::row_to_favorite)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((favorites, total as u64))
    }
}
