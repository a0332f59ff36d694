//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Phone Verify
//! service. It provides the concrete SMS providers behind the core
//! `MessageSender` capability.
//!
//! ## Features
//!
//! - `twilio-sms`: Enable the Twilio SMS provider (default)

/// SMS service module - External SMS providers
pub mod sms;

/// Configuration module for infrastructure services
pub mod config {
    //! SMS provider credentials and selection

    use serde::{Deserialize, Serialize};
    use std::fmt;
    use std::str::FromStr;

    /// Which SMS provider delivers verification messages
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum SmsProvider {
        /// Twilio Programmable Messaging
        #[default]
        Twilio,
        /// Development provider that only logs messages
        Mock,
    }

    impl SmsProvider {
        /// Whether this provider needs account credentials
        pub fn requires_credentials(&self) -> bool {
            matches!(self, SmsProvider::Twilio)
        }
    }

    impl fmt::Display for SmsProvider {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                SmsProvider::Twilio => write!(f, "twilio"),
                SmsProvider::Mock => write!(f, "mock"),
            }
        }
    }

    impl FromStr for SmsProvider {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.trim().to_lowercase().as_str() {
                "twilio" => Ok(SmsProvider::Twilio),
                "mock" => Ok(SmsProvider::Mock),
                other => Err(format!("Unknown SMS provider '{}' (expected 'twilio' or 'mock')", other)),
            }
        }
    }

    /// SMS service configuration
    #[derive(Clone, Serialize, Deserialize)]
    pub struct SmsConfig {
        /// SMS service provider
        pub provider: SmsProvider,
        /// Provider account identifier
        #[serde(skip_serializing)]
        pub account_sid: String,
        /// Provider auth token
        #[serde(skip_serializing)]
        pub auth_token: String,
        /// Sending phone number (E.164)
        pub from_number: String,
        /// Timeout for a single provider request in seconds
        pub request_timeout_secs: u64,
    }

    impl fmt::Debug for SmsConfig {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("SmsConfig")
                .field("provider", &self.provider)
                .field("account_sid", &"<redacted>")
                .field("auth_token", &"<redacted>")
                .field("from_number", &self.from_number)
                .field("request_timeout_secs", &self.request_timeout_secs)
                .finish()
        }
    }

    impl SmsConfig {
        /// Configuration for the development provider
        pub fn mock(from_number: impl Into<String>) -> Self {
            Self {
                provider: SmsProvider::Mock,
                account_sid: String::new(),
                auth_token: String::new(),
                from_number: from_number.into(),
                request_timeout_secs: 10,
            }
        }
    }

}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Provider did not answer in time
    #[error("SMS provider timed out after {0} seconds")]
    Timeout(u64),
}
