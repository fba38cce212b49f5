use actix_web::{web, HttpResponse};
use rc_core::services::auth::Credentials;
use validator::Validate;

use crate::dto::auth::LoginRequest;
use crate::handlers::ApiResult;
use crate::state::AppState;

/// Handler for POST /auth/login/
///
/// Takes `phone` or `email` with `password`. The identifier used must be
/// verified.
///
/// # Response
///
/// ```json
/// {
///     "access": "eyJ...",
///     "refresh": "9f2c...",
///     "expires_in": 900,
///     "user": { "id": "...", "email": "a@b.com", ... }
/// }
/// ```
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    let credentials = Credentials::from(request);
    let response = state.auth.login(&credentials).await?;

    Ok(HttpResponse::Ok().json(response))
}
