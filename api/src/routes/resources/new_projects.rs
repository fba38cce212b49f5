//! `/new-projects/`

use actix_web::HttpResponse;
use async_trait::async_trait;
use rc_core::domain::entities::{NewProjectDraft, NewProjectPatch};
use rc_core::repositories::NewProjectFilter;

use super::{created, no_content, ok, ResourceHandler, ResourceRequest};
use crate::dto::{NewProjectPatchRequest, NewProjectQuery, NewProjectRequest};
use crate::handlers::ApiResult;

const RESOURCE: &str = "new project";

#[derive(Debug, Clone, Copy, Default)]
pub struct NewProjectsResource;

#[async_trait(?Send)]
impl ResourceHandler for NewProjectsResource {
    fn name(&self) -> &'static str {
        "new-projects"
    }

    async fn list(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let filter = NewProjectFilter::from(req.query::<NewProjectQuery>()?);
        ok(&req.state.new_projects.list(&filter, req.pagination()?).await?)
    }

    async fn retrieve(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        ok(&req.state.new_projects.retrieve(req.id(RESOURCE)?).await?)
    }

    async fn create(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let principal = req.principal()?;
        let draft = NewProjectDraft::from(req.body::<NewProjectRequest>()?);
        created(&req.state.new_projects.create(&principal, draft).await?)
    }

    async fn update(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let principal = req.principal()?;
        let id = req.id(RESOURCE)?;
        let draft = NewProjectDraft::from(req.body::<NewProjectRequest>()?);
        ok(&req.state.new_projects.update(&principal, id, draft).await?)
    }

    async fn partial_update(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let principal = req.principal()?;
        let id = req.id(RESOURCE)?;
        let patch = NewProjectPatch::from(req.body::<NewProjectPatchRequest>()?);
        ok(&req.state.new_projects.partial_update(&principal, id, patch).await?)
    }

    async fn destroy(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let principal = req.principal()?;
        req.state.new_projects.destroy(&principal, req.id(RESOURCE)?).await?;
        no_content()
    }
}
