//! Shared application state handed to every handler

use std::sync::Arc;

use rc_core::services::{
    AuthService, FavoriteService, InquiryService, NewProjectService, PropertyService, TokenService,
};
use rc_infra::cache::RedisClient;
use rc_infra::database::DatabasePool;

/// Storage and limiter backends chosen at start-up
#[derive(Clone, Default)]
pub struct Backends {
    /// Present when listings and accounts live in MySQL
    pub database: Option<Arc<DatabasePool>>,
    /// Present when rate limiting runs on Redis
    pub redis: Option<Arc<RedisClient>>,
}

impl Backends {
    pub fn storage_name(&self) -> &'static str {
        if self.database.is_some() {
            "mysql"
        } else {
            "memory"
        }
    }

    pub fn rate_limiter_name(&self) -> &'static str {
        if self.redis.is_some() {
            "redis"
        } else {
            "memory"
        }
    }
}

/// Services behind the HTTP surface
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub tokens: Arc<TokenService>,
    pub properties: Arc<PropertyService>,
    pub inquiries: Arc<InquiryService>,
    pub favorites: Arc<FavoriteService>,
    pub new_projects: Arc<NewProjectService>,
    pub backends: Backends,
}
