//! Configuration value types shared by the server crates
//!
//! - `environment` - Environment detection and default log filter
//! - `server` - HTTP server bind settings
//! - `verification` - One-time code length and lifetime

pub mod environment;
pub mod server;
pub mod verification;

pub use environment::Environment;
pub use server::ServerConfig;
pub use verification::VerificationSettings;
