//! Mock SMS Service Implementation
//!
//! A mock implementation of the SMS service for development and testing.
//! Messages are logged and kept in memory instead of being sent.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use pv_shared::phone::{is_valid_e164, mask_phone_number};

use super::sms_service::SmsService;
use crate::InfrastructureError;

/// Messages kept in the outbox; older ones are dropped first
pub const MAX_RETAINED_MESSAGES: usize = 100;

/// A message accepted by the mock provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockMessage {
    pub message_id: String,
    pub to: String,
    pub body: String,
}

/// Mock SMS service for development and testing
///
/// Clones share the same outbox, so a test can keep a handle while the
/// service itself is moved into an adapter.
#[derive(Clone, Default)]
pub struct MockSmsService {
    /// Messages accepted so far
    outbox: Arc<Mutex<Vec<MockMessage>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
}

impl MockSmsService {
    /// Create a new mock SMS service
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock service that rejects every message
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Number of messages currently retained
    pub fn get_message_count(&self) -> usize {
        self.lock_outbox().len()
    }

    /// All messages accepted so far, oldest first
    pub fn sent_messages(&self) -> Vec<MockMessage> {
        self.lock_outbox().clone()
    }

    /// Body of the most recent message to `phone_number`
    pub fn last_message_to(&self, phone_number: &str) -> Option<String> {
        self.lock_outbox()
            .iter()
            .rev()
            .find(|m| m.to == phone_number)
            .map(|m| m.body.clone())
    }

    fn lock_outbox(&self) -> std::sync::MutexGuard<'_, Vec<MockMessage>> {
        self.outbox.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        if !is_valid_e164(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                mask_phone_number(phone_number)
            )));
        }

        if self.simulate_failure {
            warn!(
                "Mock SMS service simulating failure for phone: {}",
                mask_phone_number(phone_number)
            );
            return Err(InfrastructureError::Sms(
                "Simulated SMS sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        {
            let mut outbox = self.lock_outbox();
            if outbox.len() >= MAX_RETAINED_MESSAGES {
                let overflow = outbox.len() + 1 - MAX_RETAINED_MESSAGES;
                outbox.drain(..overflow);
            }
            outbox.push(MockMessage {
                message_id: message_id.clone(),
                to: phone_number.to_string(),
                body: message.to_string(),
            });
        }

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %mask_phone_number(phone_number),
            message_id = %message_id,
            message_length = message.len(),
            "SMS sent successfully (mock)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure
    }
}
