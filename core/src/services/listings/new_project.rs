//! Developer projects not yet on the resale market

use rc_shared::types::{PaginatedResponse, Pagination};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::new_project::{NewProject, NewProjectDraft, NewProjectPatch};
use crate::domain::value_objects::Principal;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{NewProjectFilter, NewProjectRepository};
use crate::services::clock::{Clock, SystemClock};

use super::{ensure_can_modify, require_text};

pub struct NewProjectService {
    projects: Arc<dyn NewProjectRepository>,
    clock: Arc<dyn Clock>,
}

impl NewProjectService {
    pub fn new(projects: Arc<dyn NewProjectRepository>) -> Self {
        Self {
            projects,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub async fn list(
        &self,
        filter: &NewProjectFilter,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<NewProject>> {
        let (results, count) = self.projects.list(filter, pagination).await?;
        Ok(PaginatedResponse::new(results, pagination, count))
    }

    pub async fn retrieve(&self, id: Uuid) -> DomainResult<NewProject> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("new project"))
    }

    pub async fn create(
        &self,
        principal: &Principal,
        draft: NewProjectDraft,
    ) -> DomainResult<NewProject> {
        require_text("name", &draft.name)?;
        require_text("developer", &draft.developer)?;
        require_text("city", &draft.city)?;
        let project = NewProject::new(principal.user_id, draft, self.clock.now());
        validate(&project)?;
        self.projects.create(project).await
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        draft: NewProjectDraft,
    ) -> DomainResult<NewProject> {
        let mut project = self.retrieve(id).await?;
        ensure_can_modify(principal, project.owner_id, "project")?;
        project.replace(draft, self.clock.now());
        validate(&project)?;
        self.projects.update(project).await
    }

    pub async fn partial_update(
        &self,
        principal: &Principal,
        id: Uuid,
        patch: NewProjectPatch,
    ) -> DomainResult<NewProject> {
        let mut project = self.retrieve(id).await?;
        ensure_can_modify(principal, project.owner_id, "project")?;
        project.apply(patch, self.clock.now());
        validate(&project)?;
        self.projects.update(project).await
    }

    pub async fn destroy(&self, principal: &Principal, id: Uuid) -> DomainResult<()> {
        let project = self.retrieve(id).await?;
        ensure_can_modify(principal, project.owner_id, "project")?;
        self.projects.delete(id).await?;
        Ok(())
    }
}

fn validate(project: &NewProject) -> DomainResult<()> {
    require_text("name", &project.name)?;
    if !project.has_valid_price_range() {
        return Err(ValidationError::OutOfRange {
            field: "min_price".to_string(),
            min: "0".to_string(),
            max: project
                .max_price
                .map(|p| p.to_string())
                .unwrap_or_default(),
        }
        .into());
    }
    if project.total_units.is_some_and(|units| units < 0) {
        return Err(ValidationError::InvalidFormat {
            field: "total_units".to_string(),
        }
        .into());
    }
    Ok(())
}
