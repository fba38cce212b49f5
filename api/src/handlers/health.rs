//! `GET /health`

use actix_web::{web, HttpResponse};
use chrono::Utc;
use rc_shared::types::{HealthResponse, HealthStatus};

use crate::state::AppState;

/// Check the configured backends; any failing backend answers 503
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let backends = &state.backends;
    let mut healthy = true;

    if let Some(database) = &backends.database {
        if !database.health_check().await.unwrap_or(false) {
            tracing::warn!("MySQL health check failed");
            healthy = false;
        }
    }
    if let Some(redis) = &backends.redis {
        if !redis.health_check().await.unwrap_or(false) {
            tracing::warn!("Redis health check failed");
            healthy = false;
        }
    }

    let response = HealthResponse {
        status: if healthy {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        },
        storage: backends.storage_name().to_string(),
        rate_limiter: backends.rate_limiter_name().to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    if healthy {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
