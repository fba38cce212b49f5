//! MySQL implementations of the core repository traits
//!
//! Ids are stored as `CHAR(36)` strings, booleans as `TINYINT(1)` and list
//! fields as JSON text.

mod favorite_repository_impl;
mod inquiry_repository_impl;
mod new_project_repository_impl;
mod property_repository_impl;
mod token_repository_impl;
mod user_repository_impl;
mod verification_repository_impl;

pub use favorite_repository_impl::MySqlFavoriteRepository;
pub use inquiry_repository_impl::MySqlInquiryRepository;
pub use new_project_repository_impl::MySqlNewProjectRepository;
pub use property_repository_impl::MySqlPropertyRepository;
pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;
pub use verification_repository_impl::MySqlVerificationRepository;

use rc_core::errors::DomainError;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, Row};
use uuid::Uuid;

/// Map a SQLx error to `DomainError::Internal`, logging the context
pub(crate) fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!(error = %e, "{}", context);
        DomainError::internal(format!("{}: {}", context, e))
    }
}

/// Map a unique-key violation to `Conflict`, everything else to `Internal`
pub(crate) fn write_error(
    context: &'static str,
    conflict: &'static str,
) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::Conflict {
            message: conflict.to_string(),
        },
        _ => db_error(context)(e),
    }
}

/// Read a column, mapping decode failures to `Internal`
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get(name)
        .map_err(|e| DomainError::internal(format!("Failed to read {}: {}", name, e)))
}

/// Read a `CHAR(36)` column as a UUID
pub(crate) fn uuid_column(row: &MySqlRow, name: &str) -> Result<Uuid, DomainError> {
    let raw: String = column(row, name)?;
    Uuid::parse_str(&raw)
        .map_err(|e| DomainError::internal(format!("Invalid UUID in {}: {}", name, e)))
}

/// Read a text column holding a textual enum value
pub(crate) fn enum_column<T>(row: &MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr<Err = String>,
{
    let raw: String = column(row, name)?;
    raw.parse().map_err(DomainError::internal)
}

pub(crate) fn encode_list(values: &[String]) -> Result<String, DomainError> {
    serde_json::to_string(values).map_err(DomainError::internal)
}

pub(crate) fn list_column(row: &MySqlRow, name: &str) -> Result<Vec<String>, DomainError> {
    let raw: String = column(row, name)?;
    serde_json::from_str(&raw)
        .map_err(|e| DomainError::internal(format!("Invalid list in {}: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_encoding() {
        let encoded = encode_list(&["Pool".to_string(), "Gym".to_string()]).unwrap();
        assert_eq!(encoded, r#"["Pool","Gym"]"#);
    }

    #[test]
    fn test_db_error_is_internal() {
        let err = db_error("Failed to load user")(sqlx::Error::RowNotFound);
        assert!(matches!(err, DomainError::Internal { .. }));
        assert!(err.to_string().contains("Failed to load user"));
    }
}
