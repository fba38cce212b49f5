//! Configuration for the token service

use chrono::Duration;
use rc_shared::config::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Access token lifetime
    pub access_token_lifetime: Duration,
    /// Refresh token lifetime
    pub refresh_token_lifetime: Duration,
    pub issuer: String,
    /// Audience claim; only validated when set
    pub audience: Option<String>,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            jwt_secret: jwt.secret.clone(),
            access_token_lifetime: Duration::seconds(jwt.access_token_expiry),
            refresh_token_lifetime: Duration::seconds(jwt.refresh_token_expiry),
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
        }
    }
}
