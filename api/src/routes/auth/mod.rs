//! Authentication route handlers
//!
//! This module contains the account endpoints:
//! - Registration and email OTP activation
//! - Phone/email verification codes and phone verification
//! - Login, token obtain and refresh
//! - Password reset by phone
//! - Current user

pub mod login;
pub mod me;
pub mod register;
pub mod reset_password;
pub mod token;
pub mod verification;

use actix_web::{web, HttpRequest};
use rc_shared::config::ServerConfig;

use crate::handlers::error::method_not_allowed;

/// Mount the auth endpoints under `/auth`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(post("/register/", register::register))
            .service(post("/verify-email-otp/", register::verify_email_otp))
            .service(post("/login/", login::login))
            .service(post("/send-verification/", verification::send_verification))
            .service(post("/send-verification-code/", verification::send_verification))
            .service(post("/verify-phone/", verification::verify_phone))
            .service(post("/token/", token::obtain))
            .service(post("/token/refresh/", token::refresh))
            .service(post("/reset-password/", reset_password::reset_password))
            .service(
                web::resource("/me/")
                    .route(web::get().to(me::me))
                    .default_service(web::to(method_not_allowed)),
            ),
    );
}

fn post<F, Args>(path: &str, handler: F) -> actix_web::Resource
where
    F: actix_web::Handler<Args>,
    Args: actix_web::FromRequest + 'static,
    F::Output: actix_web::Responder + 'static,
{
    web::resource(path)
        .route(web::post().to(handler))
        .default_service(web::to(method_not_allowed))
}

/// Best-effort client address for per-IP rate limiting
///
/// Forwarding headers are honored only when the direct peer is listed in
/// `ServerConfig::trusted_proxies`.
pub fn client_ip(req: &HttpRequest) -> Option<String> {
    let peer = req.peer_addr().map(|addr| addr.ip());
    let trusted = match (peer, req.app_data::<web::Data<ServerConfig>>()) {
        (Some(ip), Some(server)) => server.is_trusted_proxy(ip),
        _ => false,
    };

    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    };

    if trusted {
        if let Some(forwarded) = header("x-forwarded-for").or_else(|| header("x-real-ip")) {
            return Some(forwarded);
        }
    }
    peer.map(|ip| ip.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn behind_proxy(proxy: &str) -> web::Data<ServerConfig> {
        web::Data::new(ServerConfig {
            trusted_proxies: vec![proxy.parse().unwrap()],
            ..ServerConfig::default()
        })
    }

    #[test]
    fn test_client_ip_trusted_proxy_forwards() {
        let req = TestRequest::default()
            .peer_addr("10.0.0.1:443".parse().unwrap())
            .app_data(behind_proxy("10.0.0.1"))
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .to_http_request();
        assert_eq!(client_ip(&req).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_client_ip_trusted_proxy_real_ip() {
        let req = TestRequest::default()
            .peer_addr("10.0.0.1:443".parse().unwrap())
            .app_data(behind_proxy("10.0.0.1"))
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .to_http_request();
        assert_eq!(client_ip(&req).as_deref(), Some("198.51.100.2"));
    }

    #[test]
    fn test_client_ip_ignores_headers_from_untrusted_peer() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.10:54321".parse().unwrap())
            .app_data(behind_proxy("10.0.0.1"))
            .insert_header(("X-Forwarded-For", "203.0.113.7"))
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .to_http_request();
        assert_eq!(client_ip(&req).as_deref(), Some("192.0.2.10"));
    }

    #[test]
    fn test_client_ip_without_proxy_config_uses_peer() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.10:54321".parse().unwrap())
            .insert_header(("X-Forwarded-For", "203.0.113.7"))
            .to_http_request();
        assert_eq!(client_ip(&req).as_deref(), Some("192.0.2.10"));
    }

    #[test]
    fn test_client_ip_falls_back_to_peer() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.10:54321".parse().unwrap())
            .to_http_request();
        assert_eq!(client_ip(&req).as_deref(), Some("192.0.2.10"));
    }
}
