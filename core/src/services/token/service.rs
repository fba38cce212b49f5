//! Main token service implementation

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken, TokenPair};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::TokenRepository;
use crate::services::clock::{Clock, SystemClock};

use super::config::TokenServiceConfig;

const REFRESH_TOKEN_BYTES: usize = 32;

/// Service for managing JWT access tokens and refresh tokens
pub struct TokenService {
    repository: Arc<dyn TokenRepository>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Creates a new token service signing with HS256
    pub fn new(repository: Arc<dyn TokenRepository>, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is checked against the injected clock, not by jsonwebtoken
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience.as_str()]),
            None => validation.validate_aud = false,
        }

        Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Access token lifetime in seconds, as reported to clients
    pub fn access_expires_in(&self) -> i64 {
        self.config.access_token_lifetime.num_seconds()
    }

    /// Generates a new token pair for a user and stores the refresh token hash
    pub async fn generate_tokens(&self, user_id: Uuid, is_staff: bool) -> DomainResult<TokenPair> {
        let now = self.clock.now();
        let claims = Claims::new_access_token(
            user_id,
            is_staff,
            now,
            self.config.access_token_lifetime,
            &self.config.issuer,
            self.config.audience.as_deref(),
        );
        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to sign access token");
                TokenError::TokenGenerationFailed
            })?;

        let refresh_token = generate_opaque_token();
        let record = RefreshToken::new(
            user_id,
            hash_token(&refresh_token),
            now,
            self.config.refresh_token_lifetime,
        );
        self.repository.save_refresh_token(record).await?;

        tracing::debug!(user_id = %user_id, jti = %claims.jti, "Issued token pair");

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_in: self.config.access_token_lifetime.num_seconds(),
            refresh_expires_in: self.config.refresh_token_lifetime.num_seconds(),
        })
    }

    /// Verifies an access token and returns its claims
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidIssuer
                | ErrorKind::InvalidAudience
                | ErrorKind::MissingRequiredClaim(_) => TokenError::InvalidClaims,
                _ => TokenError::InvalidTokenFormat,
            }
        })?;

        let claims = data.claims;
        let now = self.clock.now().timestamp();
        if now >= claims.exp {
            return Err(TokenError::TokenExpired);
        }
        if now < claims.nbf {
            return Err(TokenError::InvalidClaims);
        }
        claims.user_id().map_err(|_| TokenError::InvalidClaims)?;

        Ok(claims)
    }

    /// Consumes a refresh token for rotation.
    ///
    /// The presented token is revoked exactly once; the caller mints the
    /// replacement pair. Presenting an already revoked token is treated as
    /// reuse and revokes every token of its owner.
    pub async fn consume_refresh_token(&self, raw: &str) -> DomainResult<RefreshToken> {
        let token = self
            .repository
            .find_by_hash(&hash_token(raw))
            .await?
            .ok_or(TokenError::InvalidRefreshToken)?;

        if token.is_revoked {
            let revoked = self.repository.revoke_all_user_tokens(token.user_id).await?;
            tracing::warn!(
                user_id = %token.user_id,
                revoked = revoked,
                event = "refresh_token_reuse",
                "Revoked refresh token presented again"
            );
            return Err(TokenError::TokenRevoked.into());
        }

        if token.is_expired_at(self.clock.now()) {
            return Err(TokenError::RefreshTokenExpired.into());
        }

        if !self.repository.revoke_token(token.id).await? {
            // Lost a race against a concurrent refresh of the same token
            return Err(TokenError::TokenRevoked.into());
        }

        Ok(token)
    }

    /// Revokes a single refresh token; false when unknown or already revoked
    pub async fn revoke_refresh_token(&self, raw: &str) -> DomainResult<bool> {
        match self.repository.find_by_hash(&hash_token(raw)).await? {
            Some(token) => self.repository.revoke_token(token.id).await,
            None => Ok(false),
        }
    }

    /// Revokes all tokens for a user
    pub async fn revoke_all_user_tokens(&self, user_id: Uuid) -> DomainResult<u64> {
        let revoked = self.repository.revoke_all_user_tokens(user_id).await?;
        tracing::info!(user_id = %user_id, revoked = revoked, "Revoked all refresh tokens");
        Ok(revoked)
    }

    /// Removes expired refresh tokens from storage
    pub async fn purge_expired(&self) -> Result<u64, DomainError> {
        self.repository.delete_expired_tokens(self.clock.now()).await
    }
}

fn generate_opaque_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hashes a token for storage
pub(crate) fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
