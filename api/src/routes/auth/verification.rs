use actix_web::{web, HttpRequest, HttpResponse};
use rc_shared::types::ApiResponse;
use validator::Validate;

use super::client_ip;
use crate::dto::auth::{SendVerificationRequest, VerifyPhoneRequest};
use crate::handlers::ApiResult;
use crate::state::AppState;

/// Handler for POST /auth/send-verification/
///
/// Issues a code to `phone` (SMS) or `email`. Any code issued earlier for
/// the same identifier stops working.
///
/// # Request Body
///
/// ```json
/// {
///     "phone": "+15551234567",
///     "purpose": "registration"
/// }
/// ```
///
/// ## Errors
/// - 400 malformed identifier
/// - 429 too many codes requested (`Retry-After` is set)
/// - 503 the code could not be delivered
pub async fn send_verification(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<SendVerificationRequest>,
) -> ApiResult<HttpResponse> {
    request.validate()?;
    let identifier = request.identifier()?;
    let client_ip = client_ip(&req);

    tracing::info!(
        recipient = %identifier,
        purpose = ?request.purpose,
        client_ip = client_ip.as_deref().unwrap_or("unknown"),
        "Processing send_verification request"
    );

    let issued = state
        .auth
        .send_verification(&identifier, request.purpose, client_ip.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Verification code sent successfully",
        issued,
    )))
}

/// Handler for POST /auth/verify-phone/
pub async fn verify_phone(
    state: web::Data<AppState>,
    request: web::Json<VerifyPhoneRequest>,
) -> ApiResult<HttpResponse> {
    request.validate()?;

    let profile = state.auth.verify_phone(&request.phone, &request.code).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Phone number verified", profile)))
}
