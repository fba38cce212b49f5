//! Database connection pool management
//!
//! Wraps the SQLx MySQL pool with the settings from `DatabaseConfig`,
//! a health check and the embedded schema migrations.

use log::LevelFilter;
use rc_shared::config::DatabaseConfig;
use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    ConnectOptions, MySqlPool,
};
use std::str::FromStr;
use std::time::Duration;

use crate::InfrastructureError;

/// Schema migrations embedded from `infra/migrations`
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
    config: DatabaseConfig,
}

impl DatabasePool {
    /// Create a new database connection pool
    ///
    /// Fails with a configuration error when `DATABASE_URL` is not set;
    /// callers decide whether to fall back to in-memory storage.
    pub async fn new(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| InfrastructureError::Config("DATABASE_URL not set".to_string()))?;

        tracing::info!(
            max_connections = config.max_connections,
            "Creating database connection pool"
        );

        let connect_options = MySqlConnectOptions::from_str(url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_secs(1));

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(1800))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to create database pool");
                InfrastructureError::Database(e)
            })?;

        tracing::info!("Database connection pool created successfully");

        Ok(Self { pool, config })
    }

    /// Get a reference to the underlying SQLx pool
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Check if the database connection is healthy
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let row = sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Database health check failed");
                InfrastructureError::Database(e)
            })?;

        let value: i64 = sqlx::Row::try_get(&row, 0)?;
        Ok(value == 1)
    }

    /// Get connection pool statistics
    pub fn get_statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            max_connections: self.pool.options().get_max_connections(),
        }
    }

    /// Apply pending schema migrations
    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        tracing::info!("Running database migrations");
        MIGRATOR.run(&self.pool).await?;
        tracing::info!("Database migrations completed");
        Ok(())
    }

    /// Close all connections in the pool
    pub async fn close(&self) {
        tracing::info!("Closing database connection pool");
        self.pool.close().await;
    }
}

/// Database connection pool statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatistics {
    /// Current number of connections (active + idle)
    pub connections: u32,
    /// Number of idle connections
    pub idle_connections: usize,
    /// Maximum allowed connections
    pub max_connections: u32,
}

impl PoolStatistics {
    pub fn active_connections(&self) -> u32 {
        self.connections.saturating_sub(self.idle_connections as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_url_is_config_error() {
        let result = DatabasePool::new(DatabaseConfig::default()).await;
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }

    #[tokio::test]
    async fn test_invalid_url_is_config_error() {
        let result = DatabasePool::new(DatabaseConfig::new("not a url")).await;
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }

    #[test]
    fn test_active_connections() {
        let stats = PoolStatistics {
            connections: 5,
            idle_connections: 3,
            max_connections: 10,
        };
        assert_eq!(stats.active_connections(), 2);
    }
}
