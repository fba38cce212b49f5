//! Dependency wiring.
//!
//! MySQL and Redis are used when their URLs are configured; otherwise the
//! server falls back to the in-memory repositories and rate limiter so it can
//! run on a laptop with no services at all.

use anyhow::Context;
use std::sync::Arc;

use rc_core::repositories::{
    FavoriteRepository, InMemoryFavoriteRepository, InMemoryInquiryRepository,
    InMemoryNewProjectRepository, InMemoryPropertyRepository, InMemoryTokenRepository,
    InMemoryUserRepository, InMemoryVerificationRepository, InquiryRepository,
    NewProjectRepository, PropertyRepository, TokenRepository, UserRepository,
    VerificationRepository,
};
use rc_core::services::{
    AuthService, AuthServiceConfig, CleanupConfig, CleanupService, Clock, CodeDispatcher,
    CodeGenerator, FavoriteService, InMemoryRateLimiter, InquiryService, NewProjectService,
    PropertyService, RateLimiter, SystemClock, TokenService, TokenServiceConfig,
    VerificationService, VerificationServiceConfig,
};
use rc_infra::cache::{RedisClient, RedisRateLimiter};
use rc_infra::database::{
    DatabasePool, MySqlFavoriteRepository, MySqlInquiryRepository, MySqlNewProjectRepository,
    MySqlPropertyRepository, MySqlTokenRepository, MySqlUserRepository,
    MySqlVerificationRepository,
};
use rc_infra::email::create_email_dispatcher;
use rc_infra::sms::create_sms_dispatcher;
use rc_infra::InfrastructureConfig;
use rc_shared::config::AppConfig;

use crate::state::{AppState, Backends};

/// One implementation per repository port
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenRepository>,
    pub verifications: Arc<dyn VerificationRepository>,
    pub properties: Arc<dyn PropertyRepository>,
    pub favorites: Arc<dyn FavoriteRepository>,
    pub inquiries: Arc<dyn InquiryRepository>,
    pub new_projects: Arc<dyn NewProjectRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            tokens: Arc::new(InMemoryTokenRepository::new()),
            verifications: Arc::new(InMemoryVerificationRepository::new()),
            properties: Arc::new(InMemoryPropertyRepository::new()),
            favorites: Arc::new(InMemoryFavoriteRepository::new()),
            inquiries: Arc::new(InMemoryInquiryRepository::new()),
            new_projects: Arc::new(InMemoryNewProjectRepository::new()),
        }
    }

    pub fn mysql(pool: &DatabasePool) -> Self {
        let pool = pool.get_pool();
        Self {
            users: Arc::new(MySqlUserRepository::new(pool.clone())),
            tokens: Arc::new(MySqlTokenRepository::new(pool.clone())),
            verifications: Arc::new(MySqlVerificationRepository::new(pool.clone())),
            properties: Arc::new(MySqlPropertyRepository::new(pool.clone())),
            favorites: Arc::new(MySqlFavoriteRepository::new(pool.clone())),
            inquiries: Arc::new(MySqlInquiryRepository::new(pool.clone())),
            new_projects: Arc::new(MySqlNewProjectRepository::new(pool.clone())),
        }
    }
}

/// Gateways and time sources the services depend on
pub struct Collaborators {
    pub sms: Arc<dyn CodeDispatcher>,
    pub email: Arc<dyn CodeDispatcher>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub clock: Arc<dyn Clock>,
    /// Overrides the random code generator
    pub generator: Option<Arc<dyn CodeGenerator>>,
}

/// Fully wired application
pub struct Application {
    pub state: AppState,
    pub cleanup: Arc<CleanupService>,
}

/// Build every service from its repositories and collaborators
pub fn assemble(
    repositories: Repositories,
    collaborators: Collaborators,
    config: &AppConfig,
    auth_config: AuthServiceConfig,
    backends: Backends,
) -> Application {
    let clock = collaborators.clock;

    let tokens = Arc::new(
        TokenService::new(repositories.tokens, TokenServiceConfig::from(&config.jwt))
            .with_clock(Arc::clone(&clock)),
    );

    let mut verification = VerificationService::new(
        repositories.verifications,
        collaborators.sms,
        collaborators.email,
        collaborators.rate_limiter,
        VerificationServiceConfig::from_settings(&config.verification, &config.rate_limit),
    )
    .with_clock(Arc::clone(&clock));
    if let Some(generator) = collaborators.generator {
        verification = verification.with_generator(generator);
    }
    let verification = Arc::new(verification);

    let auth = AuthService::new(
        Arc::clone(&repositories.users),
        Arc::clone(&verification),
        Arc::clone(&tokens),
        auth_config,
    )
    .with_clock(Arc::clone(&clock));

    let properties = PropertyService::new(
        Arc::clone(&repositories.properties),
        Arc::clone(&repositories.favorites),
    )
    .with_clock(Arc::clone(&clock));
    let inquiries =
        InquiryService::new(repositories.inquiries, Arc::clone(&repositories.properties))
            .with_clock(Arc::clone(&clock));
    let favorites = FavoriteService::new(repositories.favorites, repositories.properties)
        .with_clock(Arc::clone(&clock));
    let new_projects = NewProjectService::new(repositories.new_projects).with_clock(clock);

    let cleanup = Arc::new(CleanupService::new(
        Arc::clone(&tokens),
        verification,
        CleanupConfig::default(),
    ));

    Application {
        state: AppState {
            auth: Arc::new(auth),
            tokens,
            properties: Arc::new(properties),
            inquiries: Arc::new(inquiries),
            favorites: Arc::new(favorites),
            new_projects: Arc::new(new_projects),
            backends,
        },
        cleanup,
    }
}

/// Connect to the configured backends and wire the application
pub async fn bootstrap(config: &AppConfig) -> anyhow::Result<Application> {
    let infra = InfrastructureConfig::from_env().context("invalid delivery configuration")?;
    let mut backends = Backends::default();

    let repositories = match &config.database.url {
        Some(_) => {
            let pool = DatabasePool::new(config.database.clone())
                .await
                .context("failed to connect to MySQL")?;
            if config.database.run_migrations {
                pool.run_migrations().await.context("failed to run migrations")?;
            }
            let stats = pool.get_statistics();
            tracing::info!(
                connections = stats.connections,
                max_connections = stats.max_connections,
                "MySQL storage ready"
            );
            let repositories = Repositories::mysql(&pool);
            backends.database = Some(Arc::new(pool));
            repositories
        }
        None => {
            tracing::warn!(
                "DATABASE_URL not set; using in-memory storage, data is lost on restart"
            );
            Repositories::in_memory()
        }
    };

    let rate_limiter: Arc<dyn RateLimiter> = match &config.cache.url {
        Some(_) => {
            let client = Arc::new(
                RedisClient::new(config.cache.clone())
                    .await
                    .context("failed to connect to Redis")?,
            );
            backends.redis = Some(Arc::clone(&client));
            Arc::new(RedisRateLimiter::new(client))
        }
        None => {
            tracing::warn!("REDIS_URL not set; rate limits are tracked per process");
            Arc::new(InMemoryRateLimiter::new())
        }
    };

    let collaborators = Collaborators {
        sms: create_sms_dispatcher(&infra.sms).context("failed to create SMS dispatcher")?,
        email: create_email_dispatcher(&infra.email)
            .context("failed to create email dispatcher")?,
        rate_limiter,
        clock: Arc::new(SystemClock),
        generator: None,
    };

    Ok(assemble(
        repositories,
        collaborators,
        config,
        AuthServiceConfig::from_env(),
        backends,
    ))
}
