//! `/inquiries/`, visible to the sender, the property owner and staff

use actix_web::{web, HttpResponse};
use async_trait::async_trait;
use rc_core::domain::entities::{InquiryDraft, InquiryPatch};

use super::{created, no_content, ok, ResourceHandler, ResourceRequest};
use crate::dto::{InquiryPatchRequest, InquiryRequest};
use crate::handlers::error::method_not_allowed;
use crate::handlers::ApiResult;

const NAME: &str = "inquiries";
const RESOURCE: &str = "inquiry";

#[derive(Debug, Clone, Copy, Default)]
pub struct InquiriesResource;

#[async_trait(?Send)]
impl ResourceHandler for InquiriesResource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn list(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let principal = req.principal()?;
        ok(&req.state.inquiries.list(&principal, req.pagination()?).await?)
    }

    async fn retrieve(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let principal = req.principal()?;
        ok(&req.state.inquiries.retrieve(&principal, req.id(RESOURCE)?).await?)
    }

    async fn create(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let principal = req.principal()?;
        let draft = InquiryDraft::from(req.body::<InquiryRequest>()?);
        created(&req.state.inquiries.create(&principal, draft).await?)
    }

    async fn update(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let principal = req.principal()?;
        let id = req.id(RESOURCE)?;
        let draft = InquiryDraft::from(req.body::<InquiryRequest>()?);
        ok(&req.state.inquiries.update(&principal, id, draft).await?)
    }

    async fn partial_update(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let principal = req.principal()?;
        let id = req.id(RESOURCE)?;
        let patch = InquiryPatch::from(req.body::<InquiryPatchRequest>()?);
        ok(&req.state.inquiries.partial_update(&principal, id, patch).await?)
    }

    async fn destroy(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let principal = req.principal()?;
        req.state.inquiries.destroy(&principal, req.id(RESOURCE)?).await?;
        no_content()
    }

    fn configure_actions(&self, cfg: &mut web::ServiceConfig) {
        cfg.service(
            web::resource(format!("/{}/{{id}}/approve/", NAME))
                .route(web::post().to(approve))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource(format!("/{}/{{id}}/reject/", NAME))
                .route(web::post().to(reject))
                .default_service(web::to(method_not_allowed)),
        );
    }
}

async fn approve(req: ResourceRequest) -> ApiResult<HttpResponse> {
    let principal = req.principal()?;
    ok(&req.state.inquiries.approve(&principal, req.id(RESOURCE)?).await?)
}

async fn reject(req: ResourceRequest) -> ApiResult<HttpResponse> {
    let principal = req.principal()?;
    ok(&req.state.inquiries.reject(&principal, req.id(RESOURCE)?).await?)
}
