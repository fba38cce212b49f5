//! Shared fixtures for the HTTP tests: in-memory storage, recording
//! dispatchers and a clock the test controls.

#![allow(dead_code)]

use actix_web::test::TestRequest;
use chrono::Utc;
use rc_api::bootstrap::{assemble, Collaborators, Repositories};
use rc_api::state::{AppState, Backends};
use rc_core::domain::value_objects::Channel;
use rc_core::services::verification::testing::{RecordingDispatcher, SequenceCodeGenerator};
use rc_core::services::{
    AuthServiceConfig, CodeDispatcher, CodeGenerator, InMemoryRateLimiter, ManualClock,
};
use rc_shared::config::AppConfig;
use serde_json::{json, Value};
use std::sync::Arc;

pub const PASSWORD: &str = "correct-horse";

pub struct TestContext {
    pub state: AppState,
    pub config: AppConfig,
    pub sms: Arc<RecordingDispatcher>,
    pub email: Arc<RecordingDispatcher>,
    pub clock: Arc<ManualClock>,
}

pub struct TestContextBuilder {
    config: AppConfig,
    codes: Vec<String>,
    sms: Option<Arc<dyn CodeDispatcher>>,
    email: Option<Arc<dyn CodeDispatcher>>,
}

impl TestContextBuilder {
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Codes handed out in order instead of random ones
    pub fn codes(mut self, codes: &[&str]) -> Self {
        self.codes = codes.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn sms_dispatcher(mut self, dispatcher: Arc<dyn CodeDispatcher>) -> Self {
        self.sms = Some(dispatcher);
        self
    }

    pub fn email_dispatcher(mut self, dispatcher: Arc<dyn CodeDispatcher>) -> Self {
        self.email = Some(dispatcher);
        self
    }

    pub fn build(self) -> TestContext {
        let sms = Arc::new(RecordingDispatcher::new(Channel::Sms));
        let email = Arc::new(RecordingDispatcher::new(Channel::Email));
        let clock = Arc::new(ManualClock::new(Utc::now()));

        let generator: Option<Arc<dyn CodeGenerator>> = if self.codes.is_empty() {
            None
        } else {
            Some(Arc::new(SequenceCodeGenerator::new(self.codes)))
        };
        let sms_dispatcher: Arc<dyn CodeDispatcher> = match self.sms {
            Some(dispatcher) => dispatcher,
            None => sms.clone(),
        };
        let email_dispatcher: Arc<dyn CodeDispatcher> = match self.email {
            Some(dispatcher) => dispatcher,
            None => email.clone(),
        };

        let collaborators = Collaborators {
            sms: sms_dispatcher,
            email: email_dispatcher,
            rate_limiter: Arc::new(InMemoryRateLimiter::new()),
            clock: clock.clone(),
            generator,
        };
        let auth_config = AuthServiceConfig {
            bcrypt_cost: 4,
            ..Default::default()
        };
        let application = assemble(
            Repositories::in_memory(),
            collaborators,
            &self.config,
            auth_config,
            Backends::default(),
        );

        TestContext {
            state: application.state,
            config: self.config,
            sms,
            email,
            clock,
        }
    }
}

impl TestContext {
    pub fn builder() -> TestContextBuilder {
        TestContextBuilder {
            config: AppConfig::default(),
            codes: Vec::new(),
            sms: None,
            email: None,
        }
    }

    pub fn new() -> Self {
        Self::builder().build()
    }
}

/// Build the full application for `$ctx` and start it as a test service
#[macro_export]
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(rc_api::app::create_app(
            $ctx.state.clone(),
            std::sync::Arc::new(rc_api::routes::RouteTable::standard()),
            &$ctx.config,
        ))
        .await
    };
}

/// Send a `TestRequest`, returning the status, headers and JSON body
#[macro_export]
macro_rules! call {
    ($app:expr, $req:expr) => {{
        let response = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = actix_web::test::read_body(response).await;
        let body: serde_json::Value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body is JSON")
        };
        (status, headers, body)
    }};
}

pub fn post(uri: &str, body: Value) -> TestRequest {
    TestRequest::post().uri(uri).set_json(body)
}

pub fn authed(req: TestRequest, access: &str) -> TestRequest {
    req.insert_header(("Authorization", format!("Bearer {}", access)))
}

pub fn registration(email: &str, phone: Option<&str>) -> Value {
    json!({
        "email": email,
        "password": PASSWORD,
        "re_password": PASSWORD,
        "phone": phone,
        "full_name": "Test User"
    })
}

pub fn property(title: &str, city: &str, price: u32) -> Value {
    json!({
        "title": title,
        "description": "Bright and quiet",
        "price": price,
        "address": "1 Main St",
        "city": city,
        "state": "TX",
        "zip_code": "73301",
        "beds": 2,
        "baths": 1,
        "sqft": 900,
        "property_type": "sale",
        "features": ["parking"]
    })
}

/// Register `$email`, activate it with the emailed code and log in.
/// Evaluates to the access token.
#[macro_export]
macro_rules! signup {
    ($app:expr, $ctx:expr, $email:expr) => {{
        let (status, _, _) = $crate::call!(
            $app,
            $crate::common::post(
                "/api/auth/register/",
                $crate::common::registration($email, None)
            )
        );
        assert_eq!(status, 201, "registration of {} failed", $email);

        let code = $ctx.email.last_code_for($email).expect("activation code sent");
        let (status, _, _) = $crate::call!(
            $app,
            $crate::common::post(
                "/api/auth/verify-email-otp/",
                serde_json::json!({ "email": $email, "code": code })
            )
        );
        assert_eq!(status, 200, "activation of {} failed", $email);

        let (status, _, body) = $crate::call!(
            $app,
            $crate::common::post(
                "/api/auth/login/",
                serde_json::json!({ "email": $email, "password": $crate::common::PASSWORD })
            )
        );
        assert_eq!(status, 200, "login of {} failed", $email);
        body["access"].as_str().expect("access token").to_string()
    }};
}
