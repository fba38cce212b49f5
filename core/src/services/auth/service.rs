//! Main authentication service implementation

use std::sync::Arc;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;
use crate::domain::value_objects::{AuthResponse, Identifier, UserProfile, VerificationPurpose};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::clock::{Clock, SystemClock};
use crate::services::token::TokenService;
use crate::services::verification::{IssuedCode, VerificationService};

use super::config::AuthServiceConfig;
use super::types::{Credentials, PasswordReset, Registration, RegistrationResult};

/// Authentication service for the account lifecycle
pub struct AuthService {
    /// User repository for account persistence
    user_repository: Arc<dyn UserRepository>,
    /// Issues and checks one-time codes
    verification_service: Arc<VerificationService>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        verification_service: Arc<VerificationService>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
            token_service,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Create an unverified account and send the email activation code.
    ///
    /// # Errors
    ///
    /// * `AuthError::RegistrationDisabled` - Sign-ups are switched off
    /// * `AuthError::PasswordMismatch` / `AuthError::WeakPassword` - Bad password input
    /// * `AuthError::AccountExists` - Email or phone already registered
    /// * `VerificationError::DispatchFailed` / `RateLimited` - No code was sent; the
    ///   account is removed again so the caller can retry the sign-up
    pub async fn register(
        &self,
        registration: Registration,
        client_ip: Option<&str>,
    ) -> DomainResult<RegistrationResult> {
        if !self.config.allow_registration {
            return Err(AuthError::RegistrationDisabled.into());
        }

        let email = Identifier::email(&registration.email)?;
        let phone = match registration.phone.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(Identifier::phone(raw)?),
            _ => None,
        };
        let full_name = registration.full_name.trim();
        if full_name.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "full_name".to_string(),
            }
            .into());
        }
        if registration.password != registration.re_password {
            return Err(AuthError::PasswordMismatch.into());
        }
        self.check_password_strength(&registration.password)?;

        if self.user_repository.exists_by_email(email.value()).await? {
            return Err(AuthError::AccountExists {
                field: "email".to_string(),
            }
            .into());
        }
        if let Some(phone) = &phone {
            if self.user_repository.exists_by_phone(phone.value()).await? {
                return Err(AuthError::AccountExists {
                    field: "phone".to_string(),
                }
                .into());
            }
        }

        let password_hash = self.hash_password(&registration.password)?;
        let user = self
            .user_repository
            .create(User::new(
                email.value().to_string(),
                phone.map(|p| p.value().to_string()),
                full_name.to_string(),
                password_hash,
                self.clock.now(),
            ))
            .await?;

        tracing::info!(
            user_id = %user.id,
            email = %email,
            event = "user_registered",
            "User registered"
        );

        // No account may exist without a delivered activation code
        let verification = match self
            .verification_service
            .request_code(&email, VerificationPurpose::Registration, client_ip)
            .await
        {
            Ok(issued) => issued,
            Err(e) => {
                tracing::warn!(
                    user_id = %user.id,
                    error = %e,
                    event = "registration_rolled_back",
                    "Activation code not sent; removing account"
                );
                self.user_repository.delete(user.id).await?;
                return Err(e);
            }
        };

        Ok(RegistrationResult {
            user: UserProfile::from(&user),
            verification,
        })
    }

    /// Consume the email OTP and activate the account
    pub async fn verify_email_otp(&self, email: &str, code: &str) -> DomainResult<UserProfile> {
        let identifier = Identifier::email(email)?;
        let user = self
            .user_repository
            .find_by_email(identifier.value())
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.verification_service
            .verify(&identifier, code, VerificationPurpose::Registration)
            .await?;

        let user = self
            .user_repository
            .mark_email_verified(user.id, self.clock.now())
            .await?;
        tracing::info!(user_id = %user.id, event = "email_verified", "Account activated");
        Ok(UserProfile::from(&user))
    }

    /// Issue a code for `identifier`.
    ///
    /// Password reset codes are only sent to identifiers that belong to an
    /// account.
    pub async fn send_verification(
        &self,
        identifier: &Identifier,
        purpose: VerificationPurpose,
        client_ip: Option<&str>,
    ) -> DomainResult<IssuedCode> {
        if purpose == VerificationPurpose::PasswordReset
            && self.find_by_identifier(identifier).await?.is_none()
        {
            return Err(AuthError::UserNotFound.into());
        }

        self.verification_service
            .request_code(identifier, purpose, client_ip)
            .await
    }

    /// Consume a phone OTP and mark the phone confirmed on its account
    pub async fn verify_phone(&self, phone: &str, code: &str) -> DomainResult<UserProfile> {
        let identifier = Identifier::phone(phone)?;
        let user = self
            .user_repository
            .find_by_phone(identifier.value())
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.verification_service
            .verify(&identifier, code, VerificationPurpose::Registration)
            .await?;

        let user = self
            .user_repository
            .mark_phone_verified(user.id, self.clock.now())
            .await?;
        tracing::info!(user_id = %user.id, event = "phone_verified", "Phone number confirmed");
        Ok(UserProfile::from(&user))
    }

    /// Check credentials and return tokens with the user profile
    pub async fn login(&self, credentials: &Credentials) -> DomainResult<AuthResponse> {
        let user = self.authenticate(credentials).await?;
        let tokens = self.token_service.generate_tokens(user.id, user.is_staff).await?;
        Ok(AuthResponse::from_token_pair(tokens, &user))
    }

    /// Check credentials and return a bare token pair
    pub async fn obtain_token(&self, credentials: &Credentials) -> DomainResult<TokenPair> {
        let user = self.authenticate(credentials).await?;
        self.token_service.generate_tokens(user.id, user.is_staff).await
    }

    /// Rotate a refresh token into a new pair
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let consumed = self.token_service.consume_refresh_token(refresh_token).await?;
        let user = self
            .user_repository
            .find_by_id(consumed.user_id)
            .await?
            .ok_or(TokenError::InvalidRefreshToken)?;
        if !user.is_active {
            return Err(AuthError::AccountDisabled.into());
        }
        self.token_service.generate_tokens(user.id, user.is_staff).await
    }

    /// Set a new password after a `password_reset` phone OTP.
    ///
    /// The password is checked before the code so a rejected password does
    /// not burn the code. Every refresh token of the account is revoked.
    pub async fn reset_password(&self, reset: &PasswordReset) -> DomainResult<()> {
        let identifier = Identifier::phone(&reset.phone)?;
        self.check_password_strength(&reset.password)?;

        let user = self
            .user_repository
            .find_by_phone(identifier.value())
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.verification_service
            .verify(&identifier, &reset.code, VerificationPurpose::PasswordReset)
            .await?;

        // Holding the phone proves possession just as a registration code would
        let password_hash = self.hash_password(&reset.password)?;
        let user = self
            .user_repository
            .reset_password(user.id, &password_hash, self.clock.now())
            .await?;
        self.token_service.revoke_all_user_tokens(user.id).await?;

        tracing::info!(user_id = %user.id, event = "password_reset", "Password reset");
        Ok(())
    }

    /// Load the profile of a signed-in user
    pub async fn profile(&self, user_id: uuid::Uuid) -> DomainResult<UserProfile> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        Ok(UserProfile::from(&user))
    }

    /// Password first, then account state, then verification of the
    /// identifier used to sign in.
    async fn authenticate(&self, credentials: &Credentials) -> DomainResult<User> {
        let identifier = credentials.identifier()?;
        let Some(mut user) = self.find_by_identifier(&identifier).await? else {
            tracing::info!(identifier = %identifier, event = "login_failed", "Unknown identifier");
            return Err(AuthError::InvalidCredentials.into());
        };

        let valid = bcrypt::verify(&credentials.password, &user.password_hash)
            .map_err(DomainError::internal)?;
        if !valid {
            tracing::info!(user_id = %user.id, event = "login_failed", "Password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }
        if !user.is_active {
            return Err(AuthError::AccountDisabled.into());
        }
        if !user.is_verified_for(&identifier) {
            tracing::info!(
                user_id = %user.id,
                channel = %identifier.channel(),
                event = "login_unverified",
                "Identifier not verified"
            );
            return Err(AuthError::NotVerified.into());
        }

        let now = self.clock.now();
        self.user_repository.record_login(user.id, now).await?;
        user.update_last_login(now);
        tracing::info!(user_id = %user.id, event = "login_succeeded", "User signed in");
        Ok(user)
    }

    async fn find_by_identifier(&self, identifier: &Identifier) -> DomainResult<Option<User>> {
        match identifier {
            Identifier::Phone(phone) => self.user_repository.find_by_phone(phone).await,
            Identifier::Email(email) => self.user_repository.find_by_email(email).await,
        }
    }

    fn check_password_strength(&self, password: &str) -> DomainResult<()> {
        if password.chars().count() < self.config.min_password_length {
            return Err(AuthError::WeakPassword {
                min_length: self.config.min_password_length,
            }
            .into());
        }
        Ok(())
    }

    fn hash_password(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.config.bcrypt_cost).map_err(DomainError::internal)
    }
}
