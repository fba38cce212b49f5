use actix_web::HttpServer;
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rc_api::app::create_app;
use rc_api::bootstrap::bootstrap;
use rc_api::routes::RouteTable;
use rc_shared::config::{AppConfig, LogFormat, LoggingConfig};

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the process environment still applies
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid configuration")?;

    tracing::info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting RealtyChance API server"
    );

    let application = bootstrap(&config).await?;
    Arc::clone(&application.cleanup).start_background_task();

    let routes = Arc::new(RouteTable::standard());
    let state = application.state.clone();
    let bind_address = config.server.bind_address();
    tracing::info!(
        address = %bind_address,
        prefix = %config.server.api_prefix,
        resources = ?routes.names().collect::<Vec<_>>(),
        "Server will bind"
    );

    let app_config = config.clone();
    HttpServer::new(move || create_app(state.clone(), Arc::clone(&routes), &app_config))
        .workers(config.server.workers)
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server error")?;

    if let Some(database) = &application.state.backends.database {
        database.close().await;
    }
    tracing::info!("Server stopped");
    Ok(())
}
