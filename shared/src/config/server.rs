//! Server configuration module

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,

    /// Path prefix all resource and auth routes are mounted under
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Peers whose X-Forwarded-For / X-Real-IP headers are believed
    #[serde(default)]
    pub trusted_proxies: Vec<IpAddr>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 0,
            api_prefix: default_api_prefix(),
            trusted_proxies: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            workers: std::env::var("SERVER_WORKERS")
                .ok()
                .and_then(|w| w.parse().ok())
                .unwrap_or(defaults.workers),
            api_prefix: std::env::var("API_PREFIX").unwrap_or(defaults.api_prefix),
            trusted_proxies: std::env::var("TRUSTED_PROXIES")
                .map(|proxies| {
                    proxies
                        .split(',')
                        .filter_map(|p| p.trim().parse().ok())
                        .collect()
                })
                .unwrap_or(defaults.trusted_proxies),
        }
    }

    /// Whether forwarding headers from this peer may be believed
    pub fn is_trusted_proxy(&self, peer: IpAddr) -> bool {
        self.trusted_proxies.contains(&peer)
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins (empty = allow any origin)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Max age for preflight cache in seconds
    #[serde(default = "default_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age: default_max_age(),
        }
    }
}

impl CorsConfig {
    /// Parse CORS_ALLOWED_ORIGINS as a comma separated list
    pub fn from_env() -> Self {
        let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            allowed_origins,
            ..Default::default()
        }
    }

    /// Whether any origin is accepted
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty()
    }
}

fn default_api_prefix() -> String {
    String::from("/api")
}

fn default_max_age() -> usize {
    3600
}
