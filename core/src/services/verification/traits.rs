//! Traits for outbound messaging integration

use async_trait::async_trait;

/// Capability to deliver a text message to a phone number
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send `body` to `to`, returning the provider's message id
    async fn send(&self, to: &str, body: &str) -> Result<String, String>;
}
