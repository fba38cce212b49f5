//! JWT authentication middleware.
//!
//! The middleware wraps the whole app. A request with a valid `Bearer`
//! access token gets an `AuthContext` in its extensions; a request with an
//! invalid token is rejected with 401; a request without one passes through
//! anonymously and endpoints that need a caller ask for `AuthContext`.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, AUTHORIZATION},
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use rc_core::{
    domain::entities::token::Claims,
    domain::value_objects::Principal,
    errors::{AuthError, DomainError, TokenError},
    services::TokenService,
};
use std::{
    future::{ready, Ready},
    rc::Rc,
};
use uuid::Uuid;

use crate::handlers::error::ApiError;

/// Authenticated caller injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID extracted from JWT claims
    pub user_id: Uuid,
    pub is_staff: bool,
    /// JWT ID for tracking
    pub jti: String,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims.user_id().map_err(|_| TokenError::InvalidClaims)?;
        Ok(Self {
            user_id,
            is_staff: claims.is_staff,
            jti: claims.jti,
        })
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id, self.is_staff)
    }
}

/// JWT authentication middleware factory.
///
/// Tokens are checked with the `TokenService` registered as app data.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if let Some(token) = extract_bearer_token(req.headers()) {
                match authenticate(&req, &token) {
                    Ok(context) => {
                        tracing::debug!(user_id = %context.user_id, "Request authenticated");
                        req.extensions_mut().insert(context);
                    }
                    Err(err) => {
                        tracing::debug!(reason = err.reason_code(), "Bearer token rejected");
                        let response = err.error_response();
                        return Ok(req.into_response(response).map_into_right_body());
                    }
                }
            }

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

fn authenticate(req: &ServiceRequest, token: &str) -> Result<AuthContext, ApiError> {
    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| DomainError::internal("Token verification is not configured"))?;
    let claims = tokens
        .verify_access_token(token)
        .map_err(DomainError::from)?;
    Ok(AuthContext::from_claims(claims)?)
}

/// Extracts the Bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::from(AuthError::AuthenticationRequired).into());

        ready(result)
    }
}

/// Extractor for optional authentication
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().cloned();
        ready(Ok(OptionalAuth(auth)))
    }
}
