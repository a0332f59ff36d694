//! Domain-specific error types and error handling.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid verification settings: {message}")]
    InvalidSettings { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;
