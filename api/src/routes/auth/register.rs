use actix_web::{web, HttpRequest, HttpResponse};
use rc_shared::types::ApiResponse;
use validator::Validate;

use super::client_ip;
use crate::dto::auth::{RegisterRequest, VerifyEmailOtpRequest};
use crate::handlers::ApiResult;
use crate::state::AppState;

/// Handler for POST /auth/register/
///
/// Creates an unverified account and emails the activation code.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "a@b.com",
///     "password": "s3cret-pass",
///     "re_password": "s3cret-pass",
///     "phone": "+15551234567",
///     "full_name": "Ada Lovelace"
/// }
/// ```
///
/// # Response
///
/// `201 Created` with the new profile and where the code was sent.
/// `503` with `dispatch_error` when the code could not be sent; no account
/// is kept in that case.
pub async fn register(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    let client_ip = client_ip(&req);
    let result = state
        .auth
        .register(request.into(), client_ip.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        "Registration successful. Enter the code sent to your email to activate the account.",
        result,
    )))
}

/// Handler for POST /auth/verify-email-otp/
///
/// Consumes the email OTP and activates the account.
pub async fn verify_email_otp(
    state: web::Data<AppState>,
    request: web::Json<VerifyEmailOtpRequest>,
) -> ApiResult<HttpResponse> {
    request.validate()?;

    let profile = state
        .auth
        .verify_email_otp(&request.email, &request.code)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Email verified", profile)))
}
