//! SMS Service Module
//!
//! Delivers phone verification codes. `SMS_PROVIDER=twilio` selects Twilio
//! (requires the `twilio-sms` feature); anything else falls back to the mock,
//! which only logs.

use std::sync::Arc;

use rc_core::services::verification::CodeDispatcher;

use crate::config::{SmsConfig, SmsProvider};
use crate::InfrastructureError;

pub mod dispatcher;
pub mod mock_sms;
pub mod sms_service;

#[cfg(feature = "twilio-sms")]
pub mod twilio;

pub use dispatcher::SmsCodeDispatcher;
pub use mock_sms::{MockSmsService, SentSms};
pub use sms_service::SmsService;

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

/// Create the SMS service named by the configuration
pub fn create_sms_service(config: &SmsConfig) -> Result<Arc<dyn SmsService>, InfrastructureError> {
    match config.provider {
        SmsProvider::Mock => {
            tracing::warn!("Using mock SMS service; codes are not delivered");
            Ok(Arc::new(MockSmsService::new()))
        }
        #[cfg(feature = "twilio-sms")]
        SmsProvider::Twilio => {
            let twilio_config = TwilioConfig::try_from(config)?;
            Ok(Arc::new(TwilioSmsService::new(twilio_config)))
        }
        #[cfg(not(feature = "twilio-sms"))]
        SmsProvider::Twilio => Err(InfrastructureError::Config(
            "SMS_PROVIDER=twilio requires the twilio-sms feature".to_string(),
        )),
    }
}

/// Create the phone-channel dispatcher for the verification service
pub fn create_sms_dispatcher(
    config: &SmsConfig,
) -> Result<Arc<dyn CodeDispatcher>, InfrastructureError> {
    let service = create_sms_service(config)?;
    tracing::info!(provider = service.provider_name(), "SMS dispatcher ready");
    Ok(Arc::new(SmsCodeDispatcher::new(service)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rc_core::domain::value_objects::Channel;

    #[test]
    fn test_mock_is_default() {
        let service = create_sms_service(&SmsConfig::default()).unwrap();
        assert_eq!(service.provider_name(), "Mock");
    }

    #[test]
    fn test_twilio_requires_credentials() {
        let config = SmsConfig {
            provider: SmsProvider::Twilio,
            ..Default::default()
        };
        assert!(create_sms_service(&config).is_err());
    }

    #[test]
    fn test_dispatcher_serves_sms_channel() {
        let dispatcher = create_sms_dispatcher(&SmsConfig::default()).unwrap();
        assert_eq!(dispatcher.channel(), Channel::Sms);
    }
}
