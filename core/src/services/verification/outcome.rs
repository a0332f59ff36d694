//! Result of checking a submitted code

use serde::Serialize;
use std::fmt;

/// Why a verification attempt succeeded or was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// Submission carried the pending code within its window
    Verified,
    /// No record exists for the phone number
    UnknownPhone,
    /// A record exists but its window has closed
    Expired,
    /// The submission neither equals nor contains the code
    Mismatch,
}

impl VerificationOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationOutcome::Verified)
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationOutcome::Verified => write!(f, "Verification code accepted"),
            VerificationOutcome::UnknownPhone => {
                write!(f, "No pending verification for this phone number")
            }
            VerificationOutcome::Expired => write!(f, "Verification code has expired"),
            VerificationOutcome::Mismatch => write!(f, "Verification code does not match"),
        }
    }
}
