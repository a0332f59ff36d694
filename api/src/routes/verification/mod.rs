//! Verification route handlers
//!
//! Every endpoint checks field presence first, then the shared client
//! secret, and only then touches the verification store.

pub mod request;
pub mod reset;
pub mod verify;

use constant_time_eq::constant_time_eq;
use std::sync::Arc;

use pv_core::services::verification::{MessageSender, VerificationService};

use crate::config::{Config, PublicConfig};
use crate::handlers::error::ApiError;

pub use request::request_code;
pub use reset::reset_verification;
pub use verify::verify_code;

/// Application state shared by all workers
pub struct AppState<M: MessageSender> {
    pub verification_service: Arc<VerificationService<M>>,
    /// Secret every POST body must carry
    client_secret: String,
    /// Settings published on `GET /config`
    pub public_config: PublicConfig,
}

impl<M: MessageSender> AppState<M> {
    pub fn new(verification_service: Arc<VerificationService<M>>, config: &Config) -> Self {
        Self {
            verification_service,
            client_secret: config.client_secret.clone(),
            public_config: config.public_view(),
        }
    }

    /// Reject the request unless `supplied` equals the configured secret
    pub fn authorize(&self, supplied: &str) -> Result<(), ApiError> {
        if constant_time_eq(supplied.as_bytes(), self.client_secret.as_bytes()) {
            Ok(())
        } else {
            Err(ApiError::InvalidClientSecret)
        }
    }
}
