//! `/properties/`
//!
//! Public reads, owner-only writes. Extra actions:
//! - `GET /properties/featured/`
//! - `GET /properties/search/` (same filters as the collection)
//! - `GET /properties/my_listings/` (auth)
//! - `POST|DELETE /properties/{id}/favorite/` (auth)
//! - `POST /properties/{id}/verify/` (staff)

use actix_web::{web, HttpResponse};
use async_trait::async_trait;
use rc_core::domain::entities::{PropertyDraft, PropertyPatch};
use rc_core::repositories::PropertyFilter;

use super::{created, no_content, ok, ResourceHandler, ResourceRequest};
use crate::dto::{PropertyPatchRequest, PropertyQuery, PropertyRequest};
use crate::handlers::error::method_not_allowed;
use crate::handlers::ApiResult;

const NAME: &str = "properties";
const RESOURCE: &str = "property";

#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesResource;

#[async_trait(?Send)]
impl ResourceHandler for PropertiesResource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn list(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        search(req).await
    }

    async fn retrieve(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let property = req.state.properties.retrieve(req.id(RESOURCE)?).await?;
        ok(&property)
    }

    async fn create(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let principal = req.principal()?;
        let draft = PropertyDraft::from(req.body::<PropertyRequest>()?);
        created(&req.state.properties.create(&principal, draft).await?)
    }

    async fn update(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let principal = req.principal()?;
        let id = req.id(RESOURCE)?;
        let draft = PropertyDraft::from(req.body::<PropertyRequest>()?);
        ok(&req.state.properties.update(&principal, id, draft).await?)
    }

    async fn partial_update(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let principal = req.principal()?;
        let id = req.id(RESOURCE)?;
        let patch = PropertyPatch::from(req.body::<PropertyPatchRequest>()?);
        ok(&req.state.properties.partial_update(&principal, id, patch).await?)
    }

    async fn destroy(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let principal = req.principal()?;
        req.state.properties.destroy(&principal, req.id(RESOURCE)?).await?;
        no_content()
    }

    fn configure_actions(&self, cfg: &mut web::ServiceConfig) {
        cfg.service(
            web::resource(format!("/{}/featured/", NAME))
                .route(web::get().to(featured))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource(format!("/{}/search/", NAME))
                .route(web::get().to(search))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource(format!("/{}/my_listings/", NAME))
                .route(web::get().to(my_listings))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource(format!("/{}/{{id}}/favorite/", NAME))
                .route(web::post().to(add_favorite))
                .route(web::delete().to(remove_favorite))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource(format!("/{}/{{id}}/verify/", NAME))
                .route(web::post().to(verify))
                .default_service(web::to(method_not_allowed)),
        );
    }
}

async fn search(req: ResourceRequest) -> ApiResult<HttpResponse> {
    let filter = PropertyFilter::from(req.query::<PropertyQuery>()?);
    let page = req.state.properties.list(&filter, req.pagination()?).await?;
    ok(&page)
}

async fn featured(req: ResourceRequest) -> ApiResult<HttpResponse> {
    ok(&req.state.properties.featured(req.pagination()?).await?)
}

async fn my_listings(req: ResourceRequest) -> ApiResult<HttpResponse> {
    let principal = req.principal()?;
    ok(&req.state.properties.my_listings(&principal, req.pagination()?).await?)
}

async fn add_favorite(req: ResourceRequest) -> ApiResult<HttpResponse> {
    let principal = req.principal()?;
    let favorite = req
        .state
        .favorites
        .add_for_property(&principal, req.id(RESOURCE)?)
        .await?;
    created(&favorite)
}

async fn remove_favorite(req: ResourceRequest) -> ApiResult<HttpResponse> {
    let principal = req.principal()?;
    req.state
        .favorites
        .remove_for_property(&principal, req.id(RESOURCE)?)
        .await?;
    no_content()
}

async fn verify(req: ResourceRequest) -> ApiResult<HttpResponse> {
    let principal = req.principal()?;
    ok(&req.state.properties.verify(&principal, req.id(RESOURCE)?).await?)
}
