//! SMS Service Adapter
//!
//! Implements the core `MessageSender` capability on top of any
//! infrastructure `SmsService`.

use async_trait::async_trait;
use pv_core::services::verification::MessageSender;

use crate::sms::sms_service::SmsService;

/// Adapter that exposes an SMS provider as a core `MessageSender`
pub struct SmsSenderAdapter {
    inner: Box<dyn SmsService>,
}

impl SmsSenderAdapter {
    /// Wrap a concrete provider
    pub fn new(inner: impl SmsService + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    /// Wrap a provider chosen at runtime
    pub fn from_boxed(inner: Box<dyn SmsService>) -> Self {
        Self { inner }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl MessageSender for SmsSenderAdapter {
    async fn send(&self, to: &str, body: &str) -> Result<String, String> {
        self.inner
            .send_sms(to, body)
            .await
            .map_err(|e| e.to_string())
    }
}
