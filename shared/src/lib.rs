//! Shared utilities and common types for the Phone Verify server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration value types
//! - Phone number utilities (normalization, masking, E.164 checks)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{Environment, ServerConfig, VerificationSettings};
pub use utils::phone;
