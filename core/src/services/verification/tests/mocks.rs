//! Mock implementations for testing verification service

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::services::verification::traits::MessageSender;

// Mock message sender recording every attempted message
pub struct MockMessageSender {
    pub attempted_messages: Arc<Mutex<Vec<(String, String)>>>,
    pub delivered: Arc<Mutex<usize>>,
    pub should_fail: bool,
    pub delay: Option<Duration>,
}

impl MockMessageSender {
    pub fn new(should_fail: bool) -> Self {
        Self {
            attempted_messages: Arc::new(Mutex::new(Vec::new())),
            delivered: Arc::new(Mutex::new(0)),
            should_fail,
            delay: None,
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(false)
        }
    }

    pub fn attempt_count(&self) -> usize {
        self.attempted_messages.lock().unwrap().len()
    }

    pub fn delivered_count(&self) -> usize {
        *self.delivered.lock().unwrap()
    }

    pub fn last_body_for(&self, phone: &str) -> Option<String> {
        self.attempted_messages
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == phone)
            .map(|(_, body)| body.clone())
    }

    /// Code carried by the most recent message to `phone`
    pub fn last_code_for(&self, phone: &str) -> Option<String> {
        let body = self.last_body_for(phone)?;
        let (_, rest) = body.split_once("is: ")?;
        Some(rest.chars().take_while(|c| c.is_ascii_digit()).collect())
    }
}

#[async_trait]
impl MessageSender for MockMessageSender {
    async fn send(&self, to: &str, body: &str) -> Result<String, String> {
        self.attempted_messages
            .lock()
            .unwrap()
            .push((to.to_string(), body.to_string()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail {
            return Err("SMS provider error".to_string());
        }
        let mut delivered = self.delivered.lock().unwrap();
        *delivered += 1;
        Ok(format!("mock-msg-{}", *delivered))
    }
}
