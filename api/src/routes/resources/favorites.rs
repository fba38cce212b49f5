//! `/favorites/`, always scoped to the caller. Favorites are not edited in
//! place, so PUT and PATCH answer 405.

use actix_web::HttpResponse;
use async_trait::async_trait;

use super::{created, no_content, ok, ResourceHandler, ResourceRequest};
use crate::dto::FavoriteRequest;
use crate::handlers::ApiResult;

const RESOURCE: &str = "favorite";

#[derive(Debug, Clone, Copy, Default)]
pub struct FavoritesResource;

#[async_trait(?Send)]
impl ResourceHandler for FavoritesResource {
    fn name(&self) -> &'static str {
        "favorites"
    }

    async fn list(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let principal = req.principal()?;
        ok(&req.state.favorites.list(&principal, req.pagination()?).await?)
    }

    async fn retrieve(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let principal = req.principal()?;
        ok(&req.state.favorites.retrieve(&principal, req.id(RESOURCE)?).await?)
    }

    async fn create(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let principal = req.principal()?;
        let request = req.body::<FavoriteRequest>()?;
        created(&req.state.favorites.create(&principal, request.property).await?)
    }

    async fn destroy(&self, req: ResourceRequest) -> ApiResult<HttpResponse> {
        let principal = req.principal()?;
        req.state.favorites.destroy(&principal, req.id(RESOURCE)?).await?;
        no_content()
    }
}
