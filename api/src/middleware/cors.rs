//! CORS configuration for browser clients.
//!
//! An empty `CORS_ALLOWED_ORIGINS` accepts any origin, which is what the
//! development frontend needs. In production the list must be set; start-up
//! logs a warning otherwise.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use rc_shared::config::{CorsConfig, Environment};

/// Creates a CORS middleware instance for the configured origins
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::RETRY_AFTER])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        if environment.is_production() {
            tracing::warn!("CORS_ALLOWED_ORIGINS is empty in production; any origin is accepted");
        }
        return cors.allow_any_origin();
    }

    config.allowed_origins.iter().fold(cors, |cors, origin| {
        tracing::info!(origin = %origin, "Adding allowed origin");
        cors.allowed_origin(origin)
    })
}
