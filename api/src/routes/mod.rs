//! HTTP route handlers

pub mod config;
pub mod verification;

pub use verification::AppState;
