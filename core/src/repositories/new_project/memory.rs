//! In-memory implementation of NewProjectRepository

use async_trait::async_trait;
use rc_shared::types::Pagination;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::new_project::NewProject;
use crate::errors::DomainError;

use super::trait_::{NewProjectFilter, NewProjectRepository};

#[derive(Clone, Default)]
pub struct InMemoryNewProjectRepository {
    projects: Arc<RwLock<HashMap<Uuid, NewProject>>>,
}

impl InMemoryNewProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NewProjectRepository for InMemoryNewProjectRepository {
    async fn create(&self, project: NewProject) -> Result<NewProject, DomainError> {
        self.projects
            .write()
            .await
            .insert(project.id, project.clone());
        Ok(project)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<NewProject>, DomainError> {
        Ok(self.projects.read().await.get(&id).cloned())
    }

    async fn update(&self, project: NewProject) -> Result<NewProject, DomainError> {
        let mut projects = self.projects.write().await;
        if !projects.contains_key(&project.id) {
            return Err(DomainError::not_found("NewProject"));
        }
        projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.projects.write().await.remove(&id).is_some())
    }

    async fn list(
        &self,
        filter: &NewProjectFilter,
        pagination: Pagination,
    ) -> Result<(Vec<NewProject>, u64), DomainError> {
        let projects = self.projects.read().await;
        let mut matched: Vec<&NewProject> =
            projects.values().filter(|p| filter.matches(p)).collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let total = matched.len() as u64;
        let page = matched
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }
}
