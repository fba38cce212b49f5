//! New-project repository trait

use async_trait::async_trait;
use rc_shared::types::Pagination;
use uuid::Uuid;

use crate::domain::entities::new_project::{NewProject, PossessionStatus};
use crate::errors::DomainError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProjectFilter {
    /// Case-insensitive match against name, developer and description
    pub query: Option<String>,
    pub city: Option<String>,
    pub possession_status: Option<PossessionStatus>,
}

impl NewProjectFilter {
    pub fn matches(&self, project: &NewProject) -> bool {
        if let Some(query) = &self.query {
            let query = query.to_lowercase();
            let hit = [&project.name, &project.developer, &project.description]
                .iter()
                .any(|h| h.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if !project.city.eq_ignore_ascii_case(city) {
                return false;
            }
        }
        self.possession_status
            .map_or(true, |status| project.possession_status == status)
    }
}

/// Repository trait for NewProject persistence
#[async_trait]
pub trait NewProjectRepository: Send + Sync {
    async fn create(&self, project: NewProject) -> Result<NewProject, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<NewProject>, DomainError>;

    async fn update(&self, project: NewProject) -> Result<NewProject, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    async fn list(
        &self,
        filter: &NewProjectFilter,
        pagination: Pagination,
    ) -> Result<(Vec<NewProject>, u64), DomainError>;
}
