use actix_web::{web, HttpResponse};

use crate::handlers::ApiResult;
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Handler for GET /auth/me/
pub async fn me(auth: AuthContext, state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let profile = state.auth.profile(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}
