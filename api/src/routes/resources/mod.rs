//! Resource routing.
//!
//! Each resource implements [`ResourceHandler`] with one method per verb.
//! The [`RouteTable`](crate::routes::RouteTable) mounts every handler under
//! `/{name}/` and `/{name}/{id}/`; verbs a handler does not implement answer
//! 405 with the standard error body.

pub mod favorites;
pub mod inquiries;
pub mod new_projects;
pub mod properties;

pub use favorites::FavoritesResource;
pub use inquiries::InquiriesResource;
pub use new_projects::NewProjectsResource;
pub use properties::PropertiesResource;

use actix_web::dev::Payload;
use actix_web::http::{Method, StatusCode};
use actix_web::{web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use rc_core::domain::value_objects::Principal;
use rc_core::errors::{AuthError, DomainError};
use rc_shared::types::Pagination;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::PageQuery;
use crate::handlers::{ApiError, ApiResult};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Verbs of the standard resource routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
    Destroy,
}

impl Verb {
    pub fn method(self) -> Method {
        match self {
            Verb::List | Verb::Retrieve => Method::GET,
            Verb::Create => Method::POST,
            Verb::Update => Method::PUT,
            Verb::PartialUpdate => Method::PATCH,
            Verb::Destroy => Method::DELETE,
        }
    }
}

fn not_allowed(verb: Verb) -> ApiResult<HttpResponse> {
    Err(ApiError::MethodNotAllowed(verb.method().to_string()))
}

/// A resource served by the router
#[async_trait(?Send)]
pub trait ResourceHandler: Send + Sync {
    /// URL segment, e.g. `properties`
    fn name(&self) -> &'static str;

    async fn list(&self, _req: ResourceRequest) -> ApiResult<HttpResponse> {
        not_allowed(Verb::List)
    }

    async fn retrieve(&self, _req: ResourceRequest) -> ApiResult<HttpResponse> {
        not_allowed(Verb::Retrieve)
    }

    async fn create(&self, _req: ResourceRequest) -> ApiResult<HttpResponse> {
        not_allowed(Verb::Create)
    }

    async fn update(&self, _req: ResourceRequest) -> ApiResult<HttpResponse> {
        not_allowed(Verb::Update)
    }

    async fn partial_update(&self, _req: ResourceRequest) -> ApiResult<HttpResponse> {
        not_allowed(Verb::PartialUpdate)
    }

    async fn destroy(&self, _req: ResourceRequest) -> ApiResult<HttpResponse> {
        not_allowed(Verb::Destroy)
    }

    /// Extra routes under `/{name}/`, mounted ahead of `/{name}/{id}/`
    fn configure_actions(&self, _cfg: &mut web::ServiceConfig) {}
}

/// Run `verb` on `handler`
pub async fn dispatch(
    handler: Arc<dyn ResourceHandler>,
    verb: Verb,
    req: ResourceRequest,
) -> ApiResult<HttpResponse> {
    tracing::debug!(resource = handler.name(), verb = ?verb, "Dispatching resource request");
    match verb {
        Verb::List => handler.list(req).await,
        Verb::Retrieve => handler.retrieve(req).await,
        Verb::Create => handler.create(req).await,
        Verb::Update => handler.update(req).await,
        Verb::PartialUpdate => handler.partial_update(req).await,
        Verb::Destroy => handler.destroy(req).await,
    }
}

/// Route that runs `verb` on `handler` for requests with the verb's method
pub fn route(handler: &Arc<dyn ResourceHandler>, verb: Verb) -> actix_web::Route {
    let handler = Arc::clone(handler);
    web::method(verb.method())
        .to(move |req: ResourceRequest| dispatch(Arc::clone(&handler), verb, req))
}

/// Everything a resource handler needs from the request
pub struct ResourceRequest {
    pub state: web::Data<AppState>,
    principal: Option<Principal>,
    query_string: String,
    id: Option<String>,
    body: Value,
}

impl ResourceRequest {
    /// Authenticated caller, or 401
    pub fn principal(&self) -> ApiResult<Principal> {
        self.principal
            .ok_or_else(|| AuthError::AuthenticationRequired.into())
    }

    /// `{id}` path segment; anything that is not a UUID cannot exist
    pub fn id(&self, resource: &str) -> ApiResult<Uuid> {
        self.id
            .as_deref()
            .and_then(|id| Uuid::parse_str(id).ok())
            .ok_or_else(|| DomainError::not_found(resource).into())
    }

    /// JSON body, deserialized and validated
    pub fn body<T>(&self) -> ApiResult<T>
    where
        T: DeserializeOwned + Validate,
    {
        let value: T = serde_json::from_value(self.body.clone())
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?;
        value.validate()?;
        Ok(value)
    }

    pub fn query<T: DeserializeOwned>(&self) -> ApiResult<T> {
        web::Query::<T>::from_query(&self.query_string)
            .map(web::Query::into_inner)
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }

    pub fn pagination(&self) -> ApiResult<Pagination> {
        Ok(self.query::<PageQuery>()?.into())
    }
}

impl FromRequest for ResourceRequest {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let principal = req
            .extensions()
            .get::<AuthContext>()
            .map(AuthContext::principal);
        let query_string = req.query_string().to_owned();
        let id = req.match_info().get("id").map(str::to_owned);
        let bytes = web::Bytes::from_request(req, payload);

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                ApiError::Domain(DomainError::internal("application state is not registered"))
            })?;
            let bytes = bytes.await?;
            let body = if bytes.iter().all(u8::is_ascii_whitespace) {
                Value::Null
            } else {
                serde_json::from_slice(&bytes)
                    .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?
            };

            Ok(ResourceRequest {
                state,
                principal,
                query_string,
                id,
                body,
            })
        })
    }
}

pub fn ok<T: Serialize>(body: &T) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(body))
}

pub fn created<T: Serialize>(body: &T) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::build(StatusCode::CREATED).json(body))
}

pub fn no_content() -> ApiResult<HttpResponse> {
    Ok(HttpResponse::NoContent().finish())
}
