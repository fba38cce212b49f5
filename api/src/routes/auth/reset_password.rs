use actix_web::{web, HttpResponse};
use rc_core::services::auth::PasswordReset;
use rc_shared::types::ApiResponse;
use validator::Validate;

use crate::dto::auth::ResetPasswordRequest;
use crate::handlers::ApiResult;
use crate::state::AppState;

/// Handler for POST /auth/reset-password/
///
/// Needs a code requested with `"purpose": "password_reset"`. Every
/// session of the account is signed out.
pub async fn reset_password(
    state: web::Data<AppState>,
    request: web::Json<ResetPasswordRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    state.auth.reset_password(&PasswordReset::from(request)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message(
        "Password has been reset. Please log in with the new password.",
    )))
}
