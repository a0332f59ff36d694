//! Unit tests for verification service

use chrono::{Duration, Utc};
use std::sync::Arc;

use pv_shared::phone::normalize_phone_number;

use crate::errors::DomainError;
use crate::services::verification::{
    VerificationOutcome, VerificationService, VerificationServiceConfig,
};

use super::mocks::MockMessageSender;

const PHONE: &str = "+15551234567";

fn config() -> VerificationServiceConfig {
    VerificationServiceConfig {
        app_hash: "FA+9qCX9VSu".to_string(),
        ..Default::default()
    }
}

fn service_with(
    sender: MockMessageSender,
    config: VerificationServiceConfig,
) -> (Arc<MockMessageSender>, VerificationService<MockMessageSender>) {
    let sender = Arc::new(sender);
    let service = VerificationService::new(sender.clone(), config).unwrap();
    (sender, service)
}

/// Issue a code for `phone`, wait for the SMS task and return the code it carried
async fn issue_code(
    service: &VerificationService<MockMessageSender>,
    sender: &MockMessageSender,
    phone: &str,
) -> String {
    let (_, dispatch) = service.request_with_dispatch(phone).await;
    dispatch.await.unwrap();
    sender
        .last_code_for(&normalize_phone_number(phone))
        .expect("a message should have been sent")
}

#[tokio::test]
async fn test_unknown_phone_never_verifies() {
    let (_, service) = service_with(MockMessageSender::new(false), config());

    assert!(!service.verify(PHONE, "123456").await);
    assert!(!service.verify(PHONE, "").await);
    assert!(!service.reset(PHONE).await);
    assert_eq!(service.last_expiration().await, None);
}

#[tokio::test]
async fn test_request_returns_expiration_and_sends_code() {
    let (sender, service) = service_with(MockMessageSender::new(false), config());

    let before = Utc::now();
    let (expires_at, dispatch) = service.request_with_dispatch(PHONE).await;
    dispatch.await.unwrap();

    assert!(expires_at >= before + Duration::seconds(300));
    assert!(expires_at <= Utc::now() + Duration::seconds(300));
    assert_eq!(service.last_expiration().await, Some(expires_at));

    let code = sender.last_code_for(PHONE).unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(sender.delivered_count(), 1);
}

#[tokio::test]
async fn test_verify_exact_and_embedded_code() {
    let (sender, service) = service_with(MockMessageSender::new(false), config());
    let code = issue_code(&service, &sender, PHONE).await;

    assert!(service.verify(PHONE, &code).await);
    assert!(service.verify(PHONE, &format!("text {} text", code)).await);
    assert!(service.verify(PHONE, &sender.last_body_for(PHONE).unwrap()).await);
}

#[tokio::test]
async fn test_verify_wrong_code() {
    let (sender, service) = service_with(MockMessageSender::new(false), config());
    let code = issue_code(&service, &sender, PHONE).await;

    let wrong: String = code
        .chars()
        .map(|c| if c == '9' { '0' } else { char::from(c as u8 + 1) })
        .collect();

    assert!(!service.verify(PHONE, &wrong).await);
    assert!(!service.verify(PHONE, &code[..code.len() - 1]).await);
    assert!(!service.verify(PHONE, "").await);
    // A failed attempt leaves the record usable
    assert!(service.verify(PHONE, &code).await);
}

#[tokio::test]
async fn test_verify_rejects_expired_code() {
    let config = VerificationServiceConfig {
        code_ttl_seconds: 0,
        ..config()
    };
    let (sender, service) = service_with(MockMessageSender::new(false), config);
    let code = issue_code(&service, &sender, PHONE).await;

    assert!(!service.verify(PHONE, &code).await);
}

#[tokio::test]
async fn test_check_reports_refusal_reason() {
    let expired_config = VerificationServiceConfig {
        code_ttl_seconds: 0,
        ..config()
    };
    let (sender, expired) = service_with(MockMessageSender::new(false), expired_config);
    let stale = issue_code(&expired, &sender, PHONE).await;
    assert_eq!(expired.check(PHONE, &stale).await, VerificationOutcome::Expired);

    let (sender, service) = service_with(MockMessageSender::new(false), config());
    assert_eq!(service.check(PHONE, "1234").await, VerificationOutcome::UnknownPhone);

    let code = issue_code(&service, &sender, PHONE).await;
    assert_eq!(service.check(PHONE, "not it").await, VerificationOutcome::Mismatch);
    assert_eq!(service.check(PHONE, &code).await, VerificationOutcome::Verified);
}

#[tokio::test]
async fn test_reset_invalidates_code() {
    let (sender, service) = service_with(MockMessageSender::new(false), config());
    let code = issue_code(&service, &sender, PHONE).await;

    assert!(service.reset(PHONE).await);
    assert!(!service.verify(PHONE, &code).await);
    assert!(!service.reset(PHONE).await);
}

#[tokio::test]
async fn test_second_request_overwrites_first_code() {
    let (sender, service) = service_with(MockMessageSender::new(false), config());
    let first = issue_code(&service, &sender, PHONE).await;

    let mut second = issue_code(&service, &sender, PHONE).await;
    while second == first {
        second = issue_code(&service, &sender, PHONE).await;
    }

    assert!(!service.verify(PHONE, &first).await);
    assert!(service.verify(PHONE, &second).await);
    assert_eq!(service.pending_count().await, 1);
}

#[tokio::test]
async fn test_four_digit_scenario_is_non_consuming() {
    let config = VerificationServiceConfig {
        code_length: 4,
        ..config()
    };
    let (sender, service) = service_with(MockMessageSender::new(false), config);
    let code = issue_code(&service, &sender, PHONE).await;
    assert_eq!(code.len(), 4);

    assert!(service.verify(PHONE, &format!("Your code is {}", code)).await);
    assert!(service.verify(PHONE, &code).await);
    assert!(service.reset(PHONE).await);
    assert!(!service.verify(PHONE, &code).await);
}

#[tokio::test]
async fn test_last_expiration_tracks_latest_request() {
    let (_, service) = service_with(MockMessageSender::new(false), config());

    let first = service.request(PHONE).await;
    assert_eq!(service.last_expiration().await, Some(first));

    let second = service.request("+442071838750").await;
    assert!(second >= first);
    assert_eq!(service.last_expiration().await, Some(second));
}

#[tokio::test]
async fn test_message_body_carries_app_hash_last() {
    let (sender, service) = service_with(MockMessageSender::new(false), config());
    let code = issue_code(&service, &sender, PHONE).await;

    let body = sender.last_body_for(PHONE).unwrap();
    assert_eq!(body, format!("<#> Your verification code is: {}\nFA+9qCX9VSu", code));
}

#[tokio::test]
async fn test_message_body_without_app_hash() {
    let (_, service) = service_with(MockMessageSender::new(false), VerificationServiceConfig::default());
    assert_eq!(service.format_message("4821"), "<#> Your verification code is: 4821");
}

#[tokio::test]
async fn test_send_failure_leaves_store_intact() {
    let (sender, service) = service_with(MockMessageSender::new(true), config());
    let code = issue_code(&service, &sender, PHONE).await;

    assert_eq!(sender.attempt_count(), 1);
    assert_eq!(sender.delivered_count(), 0);
    assert!(service.verify(PHONE, &code).await);
}

#[tokio::test(start_paused = true)]
async fn test_slow_provider_is_abandoned_after_timeout() {
    let config = VerificationServiceConfig {
        sms_timeout_secs: 1,
        ..config()
    };
    let (sender, service) = service_with(
        MockMessageSender::with_delay(std::time::Duration::from_secs(60)),
        config,
    );

    let (_, dispatch) = service.request_with_dispatch(PHONE).await;
    dispatch.await.unwrap();

    assert_eq!(sender.attempt_count(), 1);
    assert_eq!(sender.delivered_count(), 0);
    let code = sender.last_code_for(PHONE).unwrap();
    assert!(service.verify(PHONE, &code).await);
}

#[tokio::test]
async fn test_phone_numbers_are_normalized() {
    let (sender, service) = service_with(MockMessageSender::new(false), config());
    let code = issue_code(&service, &sender, "+1 (555) 123-4567").await;

    assert!(sender.last_body_for(PHONE).is_some());
    assert!(service.verify(PHONE, &code).await);
    assert!(service.verify("+1 555 123 4567", &code).await);
    assert!(service.reset("+1-555-123-4567").await);
}

#[tokio::test]
async fn test_longest_allowed_ttl_issues_codes() {
    let config = VerificationServiceConfig {
        code_ttl_seconds: 86_400,
        ..config()
    };
    let (sender, service) = service_with(MockMessageSender::new(false), config);

    let before = Utc::now();
    let code = issue_code(&service, &sender, PHONE).await;
    let expires_at = service.last_expiration().await.unwrap();

    assert!(expires_at >= before + Duration::days(1));
    assert!(service.verify(PHONE, &code).await);
}

#[tokio::test]
async fn test_non_numeric_identifiers_do_not_share_a_record() {
    let (sender, service) = service_with(MockMessageSender::new(false), config());
    let code = issue_code(&service, &sender, "alice").await;

    assert!(service.verify("alice", &code).await);
    assert!(!service.verify("bob", &code).await);
    assert!(!service.reset("carol").await);
    assert!(service.reset("alice").await);
}

#[tokio::test]
async fn test_purge_expired_drops_closed_windows() {
    let config = VerificationServiceConfig {
        code_ttl_seconds: 0,
        ..config()
    };
    let (_, service) = service_with(MockMessageSender::new(false), config);

    service.request(PHONE).await;
    // Issuing for another number sweeps the expired record above
    service.request("+442071838750").await;
    assert_eq!(service.pending_count().await, 1);

    assert_eq!(service.purge_expired().await, 1);
    assert_eq!(service.pending_count().await, 0);
    assert!(!service.reset("+442071838750").await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_for_distinct_numbers() {
    let (sender, service) = service_with(MockMessageSender::new(false), config());
    let service = Arc::new(service);

    let phones: Vec<String> = (0..50).map(|i| format!("+1555000{:04}", i)).collect();
    let mut handles = Vec::new();
    for phone in phones.clone() {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let (_, dispatch) = service.request_with_dispatch(&phone).await;
            dispatch.await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(service.pending_count().await, 50);
    for phone in &phones {
        let code = sender.last_code_for(phone).unwrap();
        assert!(service.verify(phone, &code).await);
    }
}

#[test]
fn test_invalid_settings_are_rejected() {
    let sender = Arc::new(MockMessageSender::new(false));

    for bad in [
        VerificationServiceConfig { code_length: 3, ..Default::default() },
        VerificationServiceConfig { code_length: 11, ..Default::default() },
        VerificationServiceConfig { code_ttl_seconds: -1, ..Default::default() },
        VerificationServiceConfig { code_ttl_seconds: 86_401, ..Default::default() },
        VerificationServiceConfig { code_ttl_seconds: i64::MAX, ..Default::default() },
        VerificationServiceConfig { sms_timeout_secs: 0, ..Default::default() },
    ] {
        match VerificationService::new(sender.clone(), bad) {
            Err(DomainError::InvalidSettings { .. }) => {}
            Ok(_) => panic!("settings should have been rejected"),
        }
    }
}
