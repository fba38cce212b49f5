//! Error-to-HTTP mapping.
//!
//! Every failure leaves the API as an `ErrorResponse` whose `error` field is
//! the domain reason code, so clients branch on codes instead of messages.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::{header, StatusCode};
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use rc_core::errors::{AuthError, DomainError, TokenError, ValidationError, VerificationError};
use rc_shared::errors::{error_codes, ErrorResponse};
use std::collections::HashMap;
use validator::ValidationErrors;

/// Errors returned by handlers and middleware
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request body failed DTO validation
    #[error("Invalid request data")]
    InvalidFields(HashMap<String, Vec<String>>),

    /// Body, query or path could not be parsed
    #[error("Malformed request: {0}")]
    BadRequest(String),

    #[error("Method {0} not allowed on this resource")]
    MethodNotAllowed(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<VerificationError> for ApiError {
    fn from(err: VerificationError) -> Self {
        ApiError::Domain(err.into())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Domain(err.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Domain(err.into())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        ApiError::InvalidFields(fields)
    }
}

impl ApiError {
    /// Machine-readable reason code
    pub fn reason_code(&self) -> &'static str {
        match self {
            ApiError::Domain(e) => e.reason_code(),
            ApiError::InvalidFields(_) => error_codes::VALIDATION_ERROR,
            ApiError::BadRequest(_) => error_codes::BAD_REQUEST,
            ApiError::MethodNotAllowed(_) => error_codes::METHOD_NOT_ALLOWED,
        }
    }

    /// Seconds the client should wait before retrying, if any
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            ApiError::Domain(DomainError::Verification(VerificationError::RateLimited {
                retry_after_seconds,
            })) => Some(*retry_after_seconds),
            _ => None,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::Domain(DomainError::Internal { .. }) => {
                ErrorResponse::new(self.reason_code(), "An internal error occurred")
            }
            ApiError::Domain(err) => {
                let response = ErrorResponse::new(self.reason_code(), err.to_string());
                match err {
                    DomainError::Verification(VerificationError::Mismatch {
                        remaining_attempts,
                    }) => response.add_detail("remaining_attempts", remaining_attempts),
                    DomainError::Verification(VerificationError::RateLimited {
                        retry_after_seconds,
                    }) => response.add_detail("retry_after_seconds", retry_after_seconds),
                    DomainError::ValidationErr(e) => response.add_detail("field", e.field()),
                    DomainError::Auth(AuthError::AccountExists { field }) => {
                        response.add_detail("field", field)
                    }
                    _ => response,
                }
            }
            ApiError::InvalidFields(fields) => {
                ErrorResponse::new(self.reason_code(), self.to_string())
                    .add_detail("fields", fields)
            }
            ApiError::BadRequest(_) | ApiError::MethodNotAllowed(_) => {
                ErrorResponse::new(self.reason_code(), self.to_string())
            }
        }
    }
}

fn domain_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } | DomainError::ValidationErr(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden { .. } => StatusCode::FORBIDDEN,
        DomainError::Conflict { .. } => StatusCode::CONFLICT,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Verification(e) => match e {
            VerificationError::InvalidIdentifier { .. }
            | VerificationError::Expired
            | VerificationError::Mismatch { .. }
            | VerificationError::AlreadyConsumed => StatusCode::BAD_REQUEST,
            VerificationError::NotFound => StatusCode::NOT_FOUND,
            VerificationError::MaxAttemptsExceeded | VerificationError::RateLimited { .. } => {
                StatusCode::TOO_MANY_REQUESTS
            }
            VerificationError::DispatchFailed { .. } => StatusCode::SERVICE_UNAVAILABLE,
        },
        DomainError::Auth(e) => match e {
            AuthError::InvalidCredentials | AuthError::AuthenticationRequired => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::NotVerified
            | AuthError::AccountDisabled
            | AuthError::RegistrationDisabled => StatusCode::FORBIDDEN,
            AuthError::AccountExists { .. }
            | AuthError::PasswordMismatch
            | AuthError::WeakPassword { .. } => StatusCode::BAD_REQUEST,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
        },
        DomainError::Token(TokenError::TokenGenerationFailed) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(e) => domain_status(e),
            ApiError::InvalidFields(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(
                status = status.as_u16(),
                reason = self.reason_code(),
                "Request rejected"
            );
        }

        let mut builder = HttpResponse::build(status);
        if let Some(seconds) = self.retry_after() {
            builder.insert_header((header::RETRY_AFTER, seconds.to_string()));
        }
        builder.json(self.body())
    }
}

/// `JsonConfig` hook so malformed bodies use the standard error shape
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(err.to_string()).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(err.to_string()).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(err.to_string()).into()
}

/// Default service of a resource: the path matched, the method did not
pub async fn method_not_allowed(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(ApiError::MethodNotAllowed(req.method().to_string()))
}

/// Fallback for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
