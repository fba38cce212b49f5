//! Route table.
//!
//! Built once in `main` and handed to the app factory; nothing registers
//! routes behind its back.

pub mod auth;
pub mod resources;

use actix_web::{web, HttpRequest, HttpResponse};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::handlers::error::method_not_allowed;
use resources::{
    route, FavoritesResource, InquiriesResource, NewProjectsResource, PropertiesResource,
    ResourceHandler, Verb,
};

/// Resources served under the API prefix
#[derive(Clone, Default)]
pub struct RouteTable {
    handlers: Vec<Arc<dyn ResourceHandler>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four listing resources
    pub fn standard() -> Self {
        Self::new()
            .register(PropertiesResource)
            .register(InquiriesResource)
            .register(FavoritesResource)
            .register(NewProjectsResource)
    }

    /// Add a resource; a later handler with the same name replaces the earlier one
    pub fn register<H: ResourceHandler + 'static>(mut self, handler: H) -> Self {
        let handler: Arc<dyn ResourceHandler> = Arc::new(handler);
        match self.handlers.iter().position(|h| h.name() == handler.name()) {
            Some(index) => {
                tracing::warn!(resource = handler.name(), "Resource registered twice, replacing");
                self.handlers[index] = handler;
            }
            None => self.handlers.push(handler),
        }
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.iter().map(|h| h.name())
    }

    /// Mount `/{name}/`, the handler's actions, then `/{name}/{id}/`
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        for handler in &self.handlers {
            let name = handler.name();

            cfg.service(
                web::resource(format!("/{}/", name))
                    .route(route(handler, Verb::List))
                    .route(route(handler, Verb::Create))
                    .default_service(web::to(method_not_allowed)),
            );

            handler.configure_actions(cfg);

            cfg.service(
                web::resource(format!("/{}/{{id}}/", name))
                    .route(route(handler, Verb::Retrieve))
                    .route(route(handler, Verb::Update))
                    .route(route(handler, Verb::PartialUpdate))
                    .route(route(handler, Verb::Destroy))
                    .default_service(web::to(method_not_allowed)),
            );
        }
    }
}

/// `GET {prefix}/`: collection URL of every registered resource
pub async fn api_root(req: HttpRequest, routes: web::Data<RouteTable>) -> HttpResponse {
    let connection = req.connection_info();
    let base = format!(
        "{}://{}{}",
        connection.scheme(),
        connection.host(),
        req.path().trim_end_matches('/')
    );

    let listing: BTreeMap<&str, String> = routes
        .names()
        .map(|name| (name, format!("{}/{}/", base, name)))
        .collect();

    HttpResponse::Ok().json(listing)
}
