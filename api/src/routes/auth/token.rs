//! Bare token pair endpoints, `{access, refresh}` in both directions

use actix_web::{web, HttpResponse};
use rc_core::services::auth::Credentials;
use validator::Validate;

use crate::dto::auth::{LoginRequest, RefreshTokenRequest, TokenPairResponse};
use crate::handlers::ApiResult;
use crate::state::AppState;

/// Handler for POST /auth/token/
pub async fn obtain(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    let tokens = state.auth.obtain_token(&Credentials::from(request)).await?;
    Ok(HttpResponse::Ok().json(TokenPairResponse::from(tokens)))
}

/// Handler for POST /auth/token/refresh/
///
/// The presented refresh token is consumed; the response carries its
/// replacement.
pub async fn refresh(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> ApiResult<HttpResponse> {
    request.validate()?;

    let tokens = state.auth.refresh(&request.refresh).await?;
    Ok(HttpResponse::Ok().json(TokenPairResponse::from(tokens)))
}
