//! Twilio SMS Service Implementation
//!
//! This module provides SMS sending capabilities using the Twilio API.
//! It implements the SmsService trait for production SMS delivery.
//!
//! ## Features
//!
//! - International SMS support with E.164 format validation
//! - Bounded request time; no retries, delivery is the provider's concern
//! - Security: Phone number masking in logs

use async_trait::async_trait;
use phonenumber::{Mode, PhoneNumber};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use twilio::{Client, OutboundMessage};

use pv_shared::phone::mask_phone_number;

use crate::{config::SmsConfig, sms::sms_service::SmsService, InfrastructureError};

/// Twilio rejects message bodies longer than this
const MAX_MESSAGE_LENGTH: usize = 1600;

/// Twilio SMS service configuration
#[derive(Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &"<redacted>")
            .field("auth_token", &"<redacted>")
            .field("from_number", &self.from_number)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl TwilioConfig {
    /// Build and validate the Twilio configuration from the generic SMS config
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        if config.account_sid.trim().is_empty() {
            return Err(InfrastructureError::Config("Twilio account SID is empty".to_string()));
        }
        if config.auth_token.trim().is_empty() {
            return Err(InfrastructureError::Config("Twilio auth token is empty".to_string()));
        }
        if !config.from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "Twilio sending number must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            request_timeout_secs: config.request_timeout_secs.max(1),
        })
    }
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        let client = Client::new(&config.account_sid, &config.auth_token);

        info!(
            "Twilio SMS service initialized with from number: {}",
            mask_phone_number(&config.from_number)
        );

        Ok(Self { client, config })
    }

    /// Validate and normalize phone number to E.164 format
    fn validate_phone_number(&self, phone: &str) -> Result<String, InfrastructureError> {
        let candidate = if phone.starts_with('+') {
            phone.to_string()
        } else {
            // Bare national numbers are assumed to be North American
            format!("+1{}", phone)
        };

        match candidate.parse::<PhoneNumber>() {
            Ok(parsed) => {
                let formatted = parsed.format().mode(Mode::E164).to_string();
                if !phone.starts_with('+') {
                    warn!(
                        "Phone number missing country code, assumed US: {}",
                        mask_phone_number(&formatted)
                    );
                }
                debug!("Validated phone number: {}", mask_phone_number(&formatted));
                Ok(formatted)
            }
            Err(e) => {
                error!("Invalid phone number format: {}", e);
                Err(InfrastructureError::Sms(format!(
                    "Invalid phone number format: {}",
                    e
                )))
            }
        }
    }
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let normalized_phone = self.validate_phone_number(phone_number)?;

        if message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        info!(
            "Sending SMS to {} via Twilio (message length: {} chars)",
            mask_phone_number(&normalized_phone),
            message.len()
        );

        let msg = OutboundMessage::new(&self.config.from_number, &normalized_phone, message);
        let timeout = Duration::from_secs(self.config.request_timeout_secs);

        match tokio::time::timeout(timeout, self.client.send_message(msg)).await {
            Ok(Ok(response)) => {
                info!(
                    "SMS sent successfully to {} with SID: {}",
                    mask_phone_number(&normalized_phone),
                    response.sid
                );
                Ok(response.sid)
            }
            Ok(Err(e)) => {
                error!(
                    "Failed to send SMS to {}: {}",
                    mask_phone_number(&normalized_phone),
                    e
                );
                Err(InfrastructureError::Sms(format!("Twilio request failed: {}", e)))
            }
            Err(_) => {
                error!(
                    "Twilio request for {} timed out after {}s",
                    mask_phone_number(&normalized_phone),
                    self.config.request_timeout_secs
                );
                Err(InfrastructureError::Timeout(self.config.request_timeout_secs))
            }
        }
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}
