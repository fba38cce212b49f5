//! Database configuration module

use serde::{Deserialize, Serialize};

/// MySQL connection configuration.
///
/// When no URL is configured the server runs against in-memory repositories.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of idle connections kept open
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,

    /// Run embedded migrations on start-up
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            min_connections: 1,
            connect_timeout: 30,
            idle_timeout: 600,
            run_migrations: default_run_migrations(),
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL").ok().filter(|u| !u.is_empty());
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);
        let connect_timeout = std::env::var("DATABASE_CONNECT_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);
        let run_migrations = std::env::var("DATABASE_RUN_MIGRATIONS")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        Self {
            url,
            max_connections,
            connect_timeout,
            run_migrations,
            ..Default::default()
        }
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Whether a persistent database is configured
    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }
}

fn default_run_migrations() -> bool {
    true
}
