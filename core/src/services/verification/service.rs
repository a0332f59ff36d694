//! Main verification service implementation

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use pv_shared::phone::{mask_phone_number, normalize_phone_number};

use crate::domain::entities::verification_record::VerificationRecord;
use crate::errors::DomainResult;

use super::config::VerificationServiceConfig;
use super::outcome::VerificationOutcome;
use super::traits::MessageSender;

/// Verification service owning the phone number to pending record map
///
/// All operations are safe to call concurrently: the record map sits behind
/// a single async read/write lock, and the lock is never held while an SMS
/// is being delivered.
pub struct VerificationService<M: MessageSender> {
    /// Outbound messaging capability
    message_sender: Arc<M>,
    /// Service configuration
    config: VerificationServiceConfig,
    /// Pending records keyed by normalized phone number
    records: RwLock<HashMap<String, VerificationRecord>>,
    /// Expiration computed by the most recent request
    last_expiration: RwLock<Option<DateTime<Utc>>>,
}

impl<M: MessageSender + 'static> VerificationService<M> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `message_sender` - Outbound SMS capability
    /// * `config` - Service configuration, validated here
    pub fn new(message_sender: Arc<M>, config: VerificationServiceConfig) -> DomainResult<Self> {
        config.validate()?;

        Ok(Self {
            message_sender,
            config,
            records: RwLock::new(HashMap::new()),
            last_expiration: RwLock::new(None),
        })
    }

    /// Issue a new code for `phone` and send it by SMS
    ///
    /// Any earlier record for the same number is overwritten, so only the
    /// newest code verifies. The SMS is dispatched on a background task:
    /// delivery failures are logged and never reach the caller.
    ///
    /// # Returns
    ///
    /// The instant at which the new code stops being accepted
    pub async fn request(&self, phone: &str) -> DateTime<Utc> {
        let (expires_at, _dispatch) = self.request_with_dispatch(phone).await;
        expires_at
    }

    /// Same as [`request`](Self::request), also handing back the dispatch task
    pub async fn request_with_dispatch(&self, phone: &str) -> (DateTime<Utc>, JoinHandle<()>) {
        let phone = normalize_phone_number(phone);
        let record = VerificationRecord::issue(
            phone.clone(),
            self.config.code_length,
            Duration::seconds(self.config.code_ttl_seconds),
        );
        let expires_at = record.expires_at;
        let body = self.format_message(&record.code);

        {
            let mut records = self.records.write().await;
            let purged = purge_expired_records(&mut records, Utc::now(), Some(phone.as_str()));
            if purged > 0 {
                tracing::debug!(purged, "Purged expired verification records");
            }

            if records.insert(phone.clone(), record).is_some() {
                tracing::info!(
                    phone = %mask_phone_number(&phone),
                    event = "otp_replaced",
                    "Replaced pending verification code"
                );
            }
        }

        *self.last_expiration.write().await = Some(expires_at);

        tracing::info!(
            phone = %mask_phone_number(&phone),
            event = "otp_generated",
            expires_at = %expires_at,
            "Generated new verification code"
        );

        let dispatch = self.dispatch(phone, body);
        (expires_at, dispatch)
    }

    /// Check a submitted value against the pending code for `phone`
    ///
    /// Returns true when a record exists, its window is still open, and the
    /// submission either equals the code or contains it (a forwarded SMS
    /// body). Verification does not consume the record: repeating a correct
    /// submission keeps succeeding until the code expires or is reset.
    pub async fn verify(&self, phone: &str, submitted: &str) -> bool {
        self.check(phone, submitted).await.is_verified()
    }

    /// Like [`verify`](Self::verify), reporting why a submission was refused
    pub async fn check(&self, phone: &str, submitted: &str) -> VerificationOutcome {
        let phone = normalize_phone_number(phone);
        let records = self.records.read().await;

        let Some(record) = records.get(&phone) else {
            tracing::debug!(
                phone = %mask_phone_number(&phone),
                event = "otp_unknown_phone",
                "No pending verification for phone number"
            );
            return VerificationOutcome::UnknownPhone;
        };

        if record.is_expired_at(Utc::now()) {
            tracing::info!(
                phone = %mask_phone_number(&phone),
                event = "otp_expired",
                "Verification code has expired"
            );
            return VerificationOutcome::Expired;
        }

        if record.matches(submitted) {
            tracing::info!(
                phone = %mask_phone_number(&phone),
                event = "otp_verified_success",
                "Verification code successfully verified"
            );
            VerificationOutcome::Verified
        } else {
            tracing::warn!(
                phone = %mask_phone_number(&phone),
                event = "otp_verification_failed",
                "Submitted message does not contain the verification code"
            );
            VerificationOutcome::Mismatch
        }
    }

    /// Drop the pending record for `phone`
    ///
    /// Returns true if a record existed and was removed.
    pub async fn reset(&self, phone: &str) -> bool {
        let phone = normalize_phone_number(phone);
        let removed = self.records.write().await.remove(&phone).is_some();

        tracing::info!(
            phone = %mask_phone_number(&phone),
            event = "otp_reset",
            removed,
            "Verification reset requested"
        );
        removed
    }

    /// Expiration computed by the most recent [`request`](Self::request), for any number
    pub async fn last_expiration(&self) -> Option<DateTime<Utc>> {
        *self.last_expiration.read().await
    }

    /// Remove every record whose window has closed, returning how many went
    pub async fn purge_expired(&self) -> usize {
        let mut records = self.records.write().await;
        purge_expired_records(&mut records, Utc::now(), None)
    }

    /// Number of records currently held, expired ones included
    pub async fn pending_count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Current service configuration
    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// SMS body carrying the code, with the app hash on its own last line
    pub fn format_message(&self, code: &str) -> String {
        let app_hash = self.config.app_hash.trim();
        if app_hash.is_empty() {
            format!("<#> Your verification code is: {}", code)
        } else {
            format!("<#> Your verification code is: {}\n{}", code, app_hash)
        }
    }

    fn dispatch(&self, phone: String, body: String) -> JoinHandle<()> {
        let sender = Arc::clone(&self.message_sender);
        let timeout = std::time::Duration::from_secs(self.config.sms_timeout_secs);

        tokio::spawn(async move {
            let masked = mask_phone_number(&phone);
            match tokio::time::timeout(timeout, sender.send(&phone, &body)).await {
                Ok(Ok(message_id)) => {
                    tracing::info!(
                        phone = %masked,
                        message_id = %message_id,
                        event = "sms_dispatched",
                        "Verification SMS handed to provider"
                    );
                }
                Ok(Err(error)) => {
                    tracing::warn!(
                        phone = %masked,
                        error = %error,
                        event = "sms_dispatch_failed",
                        "Failed to send verification SMS"
                    );
                }
                Err(_) => {
                    tracing::warn!(
                        phone = %masked,
                        timeout_secs = timeout.as_secs(),
                        event = "sms_dispatch_timeout",
                        "Verification SMS dispatch timed out"
                    );
                }
            }
        })
    }
}

/// Drop records expired at `now`, sparing the entry keyed `keep`
fn purge_expired_records(
    records: &mut HashMap<String, VerificationRecord>,
    now: DateTime<Utc>,
    keep: Option<&str>,
) -> usize {
    let before = records.len();
    records.retain(|key, record| Some(key.as_str()) == keep || !record.is_expired_at(now));
    before - records.len()
}
