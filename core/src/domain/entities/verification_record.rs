//! Verification record entity for SMS-based phone verification.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// A pending one-time code challenge for a single phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Normalized phone number the code was sent to
    pub phone: String,

    /// The fixed-width numeric code
    pub code: String,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp from which the code is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Issues a record with a freshly generated code that lives for `ttl`
    ///
    /// # Arguments
    ///
    /// * `phone` - Normalized phone number
    /// * `code_length` - Number of digits to generate
    /// * `ttl` - Lifetime of the code, measured from now
    pub fn issue(phone: String, code_length: usize, ttl: Duration) -> Self {
        Self::with_code(phone, Self::generate_code(code_length), Utc::now(), ttl)
    }

    /// Builds a record around a known code and issue time
    pub fn with_code(
        phone: String,
        code: String,
        created_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            phone,
            code,
            created_at,
            expires_at: created_at + ttl,
        }
    }

    /// Generates a random code of `length` decimal digits using the OS CSPRNG
    ///
    /// Leading zeros are kept, so every code is exactly `length` characters.
    pub fn generate_code(length: usize) -> String {
        let mut rng = OsRng;
        (0..length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    /// Whether the window has closed at `now` (the boundary counts as expired)
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Compares a submitted value against the stored code
    ///
    /// Matches when the value is exactly the code, or when it is a longer
    /// text (such as a forwarded SMS body) that contains the code.
    pub fn matches(&self, submitted: &str) -> bool {
        submitted.contains(self.code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(code: &str) -> VerificationRecord {
        let issued = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        VerificationRecord::with_code(
            "+15551234567".to_string(),
            code.to_string(),
            issued,
            Duration::minutes(5),
        )
    }

    #[test]
    fn test_issue_sets_window() {
        let record = VerificationRecord::issue("+15551234567".to_string(), 6, Duration::minutes(5));

        assert_eq!(record.phone, "+15551234567");
        assert_eq!(record.code.len(), 6);
        assert_eq!(record.expires_at - record.created_at, Duration::minutes(5));
        assert!(!record.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_generate_code_format() {
        for length in [4, 6, 8] {
            for _ in 0..50 {
                let code = VerificationRecord::generate_code(length);
                assert_eq!(code.len(), length);
                assert!(code.chars().all(|c| c.is_ascii_digit()));
            }
        }
    }

    #[test]
    fn test_code_uniqueness() {
        let codes: std::collections::HashSet<String> = (0..100)
            .map(|_| VerificationRecord::generate_code(6))
            .collect();
        // 100 draws from a million values should almost never collide much
        assert!(codes.len() > 90);
    }

    #[test]
    fn test_exact_and_embedded_match() {
        let record = record("4821");

        assert!(record.matches("4821"));
        assert!(record.matches("Your code is 4821"));
        assert!(record.matches("text 4821 text"));
        assert!(!record.matches("4822"));
        assert!(!record.matches("482"));
        assert!(!record.matches("48 21"));
        assert!(!record.matches(""));
    }

    #[test]
    fn test_expiry_boundary() {
        let record = record("4821");
        let just_before = record.expires_at - Duration::milliseconds(1);

        assert!(!record.is_expired_at(just_before));
        assert!(record.is_expired_at(record.expires_at));
        assert!(record.is_expired_at(record.expires_at + Duration::seconds(1)));
    }
}
