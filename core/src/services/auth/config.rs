//! Configuration for the authentication service

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
    /// Whether to allow registration of new users
    pub allow_registration: bool,
    pub min_password_length: usize,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            allow_registration: true,
            min_password_length: 8,
        }
    }
}

impl AuthServiceConfig {
    /// Read overrides from `AUTH_BCRYPT_COST` and `AUTH_ALLOW_REGISTRATION`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bcrypt_cost: std::env::var("AUTH_BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.bcrypt_cost),
            allow_registration: std::env::var("AUTH_ALLOW_REGISTRATION")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.allow_registration),
            min_password_length: defaults.min_password_length,
        }
    }
}
