//! Verification service module for SMS-based phone verification
//!
//! This module provides the one-time code workflow:
//! - Code generation and SMS dispatch through an injected sender
//! - Expiry-aware verification against exact or embedded codes
//! - Explicit reset of a pending challenge

mod config;
mod outcome;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use outcome::VerificationOutcome;
pub use service::VerificationService;
pub use traits::MessageSender;
