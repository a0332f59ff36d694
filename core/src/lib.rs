//! # Phone Verify Core
//!
//! Core business logic and domain layer for the Phone Verify backend.
//! This crate contains the verification record entity, the verification
//! service that owns the per-phone state machine, the outbound message
//! capability it depends on, and the domain error types.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
