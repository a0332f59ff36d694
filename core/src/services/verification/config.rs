//! Configuration for the verification service

use pv_shared::config::verification::{
    VerificationSettings, DEFAULT_CODE_LENGTH, DEFAULT_CODE_TTL_SECONDS, DEFAULT_SMS_TIMEOUT_SECS,
};

use crate::errors::{DomainError, DomainResult};

/// Shortest code the service will issue
pub const MIN_CODE_LENGTH: usize = 4;

/// Longest code the service will issue
pub const MAX_CODE_LENGTH: usize = 10;

/// Longest lifetime a code may be given (one day)
pub const MAX_CODE_TTL_SECONDS: i64 = 86_400;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of digits in each generated code
    pub code_length: usize,
    /// Seconds before a verification code expires
    pub code_ttl_seconds: i64,
    /// Application hash appended to the SMS so the mobile app can read it
    pub app_hash: String,
    /// Seconds a single SMS dispatch may run before it is abandoned
    pub sms_timeout_secs: u64,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            code_ttl_seconds: DEFAULT_CODE_TTL_SECONDS,
            app_hash: String::new(),
            sms_timeout_secs: DEFAULT_SMS_TIMEOUT_SECS,
        }
    }
}

impl VerificationServiceConfig {
    /// Build the service configuration from shared settings and the app hash
    pub fn from_settings(settings: &VerificationSettings, app_hash: impl Into<String>) -> Self {
        Self {
            code_length: settings.code_length,
            code_ttl_seconds: settings.code_ttl_seconds,
            app_hash: app_hash.into(),
            sms_timeout_secs: settings.sms_timeout_secs,
        }
    }

    /// Reject settings the service cannot honour
    pub fn validate(&self) -> DomainResult<()> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.code_length) {
            return Err(DomainError::InvalidSettings {
                message: format!(
                    "code_length must be between {} and {}, got {}",
                    MIN_CODE_LENGTH, MAX_CODE_LENGTH, self.code_length
                ),
            });
        }
        if !(0..=MAX_CODE_TTL_SECONDS).contains(&self.code_ttl_seconds) {
            return Err(DomainError::InvalidSettings {
                message: format!(
                    "code_ttl_seconds must be between 0 and {}, got {}",
                    MAX_CODE_TTL_SECONDS, self.code_ttl_seconds
                ),
            });
        }
        if self.sms_timeout_secs == 0 {
            return Err(DomainError::InvalidSettings {
                message: "sms_timeout_secs must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
