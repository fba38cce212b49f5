//! Email Service Module
//!
//! Delivers email verification codes. `EMAIL_PROVIDER=smtp` sends through
//! the configured relay; the default mock only logs.

use std::sync::Arc;

use rc_core::services::verification::CodeDispatcher;

use crate::config::{EmailConfig, EmailProvider};
use crate::InfrastructureError;

pub mod dispatcher;
pub mod email_service;
pub mod mock_email;
pub mod smtp;

pub use dispatcher::EmailCodeDispatcher;
pub use email_service::{EmailMessage, EmailService};
pub use mock_email::MockEmailService;
pub use smtp::SmtpEmailService;

pub fn create_email_service(
    config: &EmailConfig,
) -> Result<Arc<dyn EmailService>, InfrastructureError> {
    match config.provider {
        EmailProvider::Mock => {
            tracing::warn!("Using mock email service; codes are not delivered");
            Ok(Arc::new(MockEmailService::new()))
        }
        EmailProvider::Smtp => Ok(Arc::new(SmtpEmailService::new(config)?)),
    }
}

/// Create the email-channel dispatcher for the verification service
pub fn create_email_dispatcher(
    config: &EmailConfig,
) -> Result<Arc<dyn CodeDispatcher>, InfrastructureError> {
    let service = create_email_service(config)?;
    tracing::info!(provider = service.provider_name(), "Email dispatcher ready");
    Ok(Arc::new(EmailCodeDispatcher::new(service)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rc_core::domain::value_objects::Channel;

    #[test]
    fn test_mock_is_default() {
        let dispatcher = create_email_dispatcher(&EmailConfig::default()).unwrap();
        assert_eq!(dispatcher.channel(), Channel::Email);
    }
}
