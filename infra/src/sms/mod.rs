//! SMS Service Module
//!
//! This module provides SMS service implementations for sending verification
//! codes. It includes a Twilio provider and a mock implementation for
//! development.
//!
//! ## Features
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: Log-only delivery for development and tests
//! - **Twilio Support**: Production SMS via Twilio API
//! - **Adapter**: Bridges any provider to the core `MessageSender`

pub mod adapter;
pub mod mock_sms;
pub mod sms_service;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

// Re-export commonly used types
pub use adapter::SmsSenderAdapter;
pub use mock_sms::MockSmsService;
pub use sms_service::SmsService;

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

use crate::config::{SmsConfig, SmsProvider};
use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// Returns the provider named by `config.provider`. A provider that cannot
/// be initialised is an error so the server refuses to start instead of
/// silently dropping messages.
pub fn create_sms_service(config: &SmsConfig) -> Result<Box<dyn SmsService>, InfrastructureError> {
    match config.provider {
        SmsProvider::Mock => {
            tracing::warn!("Using mock SMS service, messages will only be logged");
            Ok(Box::new(MockSmsService::new()))
        }
        #[cfg(feature = "twilio-sms")]
        SmsProvider::Twilio => {
            let service = TwilioSmsService::new(TwilioConfig::from_sms_config(config)?)?;
            Ok(Box::new(service))
        }
        #[cfg(not(feature = "twilio-sms"))]
        SmsProvider::Twilio => Err(InfrastructureError::Config(
            "Twilio provider requested but the twilio-sms feature is disabled".to_string(),
        )),
    }
}
