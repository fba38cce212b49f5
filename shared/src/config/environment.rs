//! Environment and logging configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging/test environment
    Staging,
    /// Production environment
    Production,
}

impl Environment {
    /// Check if running in production
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Get environment from ENV variable
    pub fn from_env() -> Self {
        env::var("ENVIRONMENT")
            .or_else(|_| env::var("RUST_ENV"))
            .unwrap_or_else(|_| String::from("development"))
            .parse()
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

/// Log format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is not set
    pub level: String,

    /// Log format (json, pretty)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Create logging config for environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: String::from("debug"),
                format: LogFormat::Pretty,
            },
            Environment::Staging | Environment::Production => Self {
                level: String::from("info"),
                format: LogFormat::Json,
            },
        }
    }

    /// Environment defaults overridden by LOG_LEVEL and LOG_FORMAT
    pub fn from_env(env: Environment) -> Self {
        let mut config = Self::for_environment(env);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.level = level;
        }
        match std::env::var("LOG_FORMAT").as_deref() {
            Ok("json") => config.format = LogFormat::Json,
            Ok("pretty") => config.format = LogFormat::Pretty,
            _ => {}
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!("prod".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("Staging".parse::<Environment>(), Ok(Environment::Staging));
        assert!("moon".parse::<Environment>().is_err());
    }

    #[test]
    fn test_logging_defaults_per_environment() {
        assert_eq!(
            LoggingConfig::for_environment(Environment::Production).format,
            LogFormat::Json
        );
        assert_eq!(
            LoggingConfig::for_environment(Environment::Development).level,
            "debug"
        );
    }
}
