//! One-time code settings

use serde::{Deserialize, Serialize};

/// Default length of a generated verification code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Default lifetime of a verification code (5 minutes)
pub const DEFAULT_CODE_TTL_SECONDS: i64 = 300;

/// Default bound on a single SMS dispatch
pub const DEFAULT_SMS_TIMEOUT_SECS: u64 = 10;

/// Tunables for code generation and expiry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerificationSettings {
    /// Number of digits in each generated code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Seconds a code stays valid after it is issued
    #[serde(default = "default_code_ttl_seconds")]
    pub code_ttl_seconds: i64,

    /// Seconds an outbound SMS may take before the dispatch is abandoned
    #[serde(default = "default_sms_timeout_secs")]
    pub sms_timeout_secs: u64,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            code_ttl_seconds: DEFAULT_CODE_TTL_SECONDS,
            sms_timeout_secs: DEFAULT_SMS_TIMEOUT_SECS,
        }
    }
}

fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
}

fn default_code_ttl_seconds() -> i64 {
    DEFAULT_CODE_TTL_SECONDS
}

fn default_sms_timeout_secs() -> u64 {
    DEFAULT_SMS_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: VerificationSettings = serde_json::from_str(r#"{"code_length": 4}"#).unwrap();
        assert_eq!(settings.code_length, 4);
        assert_eq!(settings.code_ttl_seconds, DEFAULT_CODE_TTL_SECONDS);
        assert_eq!(settings.sms_timeout_secs, DEFAULT_SMS_TIMEOUT_SECS);
    }
}
