//! Application factory
//!
//! Builds the actix-web `App` from the shared state and the route table.
//! `main` calls it once per worker and tests call it directly.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::{NormalizePath, TrailingSlash},
    web, App, Error,
};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use crate::handlers::error::{
    json_error_handler, not_found, path_error_handler, query_error_handler,
};
use crate::handlers::health::health_check;
use crate::middleware::{create_cors, JwtAuth};
use crate::routes::{api_root, auth, RouteTable};
use crate::state::AppState;
use rc_shared::config::AppConfig;

/// Create and configure the application with all dependencies
pub fn create_app(
    state: AppState,
    routes: Arc<RouteTable>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let tokens = web::Data::from(Arc::clone(&state.tokens));
    let table = web::Data::from(Arc::clone(&routes));
    let server = web::Data::new(config.server.clone());
    let cors = create_cors(&config.cors, config.environment);

    App::new()
        .app_data(web::Data::new(state))
        .app_data(tokens)
        .app_data(table)
        .app_data(server)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        // Innermost first: auth sees normalized paths, CORS decorates auth
        // rejections, the tracing span covers everything.
        .wrap(JwtAuth::new())
        .wrap(NormalizePath::new(TrailingSlash::Always))
        .wrap(cors)
        .wrap(TracingLogger::default())
        .route("/health/", web::get().to(health_check))
        .service(
            web::scope(&config.server.api_prefix)
                .route("/", web::get().to(api_root))
                .configure(|cfg| routes.configure(cfg))
                .configure(auth::configure),
        )
        .default_service(web::to(not_found))
}
