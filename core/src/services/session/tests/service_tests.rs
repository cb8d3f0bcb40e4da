//! Unit tests for the session service

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::session_token::SessionToken;
use crate::errors::DomainError;
use crate::repositories::token::{MockSessionTokenRepository, SessionTokenRepository};
use crate::services::session::{SessionService, SessionServiceConfig};

use super::mocks::FailingRepository;

fn session_service() -> (
    Arc<MockSessionTokenRepository>,
    SessionService<MockSessionTokenRepository>,
) {
    let repository = Arc::new(MockSessionTokenRepository::new());
    let service = SessionService::new(repository.clone(), SessionServiceConfig::default());
    (repository, service)
}

async fn seed_token_used_at(
    repository: &MockSessionTokenRepository,
    user_id: Uuid,
    value: &str,
    ago: Duration,
) {
    repository
        .insert(SessionToken {
            token: value.to_string(),
            user_id,
            last_used_at: Utc::now() - ago,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_issue_then_verify_returns_original_user() {
    let (_, service) = session_service();
    let user_id = Uuid::new_v4();

    let value = service.issue(user_id).await.unwrap();
    let identity = service.verify(&value).await.unwrap();

    assert_eq!(identity, Some(user_id));
}

#[tokio::test]
async fn test_issued_value_has_configured_length_and_charset() {
    let (_, service) = session_service();

    let value = service.issue(Uuid::new_v4()).await.unwrap();

    assert_eq!(value.len(), 32);
    assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[tokio::test]
async fn test_issued_values_are_distinct() {
    let (_, service) = session_service();
    let user_id = Uuid::new_v4();

    let first = service.issue(user_id).await.unwrap();
    let second = service.issue(user_id).await.unwrap();

    assert_ne!(first, second);
    // Both sessions are concurrently valid
    assert_eq!(service.verify(&first).await.unwrap(), Some(user_id));
    assert_eq!(service.verify(&second).await.unwrap(), Some(user_id));
}

#[tokio::test]
async fn test_verify_unknown_token_returns_none() {
    let (_, service) = session_service();

    let identity = service.verify("no-such-token").await.unwrap();

    assert_eq!(identity, None);
}

#[tokio::test]
async fn test_verify_fails_one_millisecond_past_window() {
    let (repository, service) = session_service();
    let user_id = Uuid::new_v4();

    seed_token_used_at(
        &repository,
        user_id,
        "barely-stale",
        Duration::days(7) + Duration::milliseconds(1),
    )
    .await;

    assert_eq!(service.verify("barely-stale").await.unwrap(), None);
}

#[tokio::test]
async fn test_verify_succeeds_within_window() {
    let (repository, service) = session_service();
    let user_id = Uuid::new_v4();

    seed_token_used_at(&repository, user_id, "four-days-idle", Duration::days(4)).await;

    assert_eq!(
        service.verify("four-days-idle").await.unwrap(),
        Some(user_id)
    );
}

#[tokio::test]
async fn test_verify_refreshes_last_used_at() {
    let (repository, service) = session_service();
    let user_id = Uuid::new_v4();

    seed_token_used_at(&repository, user_id, "active", Duration::days(4)).await;
    let before_call = Utc::now();

    service.verify("active").await.unwrap();

    let stored = repository.find("active").await.unwrap().unwrap();
    assert!(stored.last_used_at >= before_call);
}

#[tokio::test]
async fn test_verify_does_not_refresh_expired_token() {
    let (repository, service) = session_service();
    let user_id = Uuid::new_v4();

    seed_token_used_at(&repository, user_id, "stale", Duration::days(8)).await;
    let original = repository.find("stale").await.unwrap().unwrap().last_used_at;

    assert_eq!(service.verify("stale").await.unwrap(), None);

    let stored = repository.find("stale").await.unwrap().unwrap();
    assert_eq!(stored.last_used_at, original);
}

#[tokio::test]
async fn test_revoke_then_verify_fails() {
    let (_, service) = session_service();
    let user_id = Uuid::new_v4();

    let value = service.issue(user_id).await.unwrap();
    service.revoke(&value).await.unwrap();

    assert_eq!(service.verify(&value).await.unwrap(), None);
}

#[tokio::test]
async fn test_revoke_unknown_token_is_noop() {
    let (_, service) = session_service();

    // No error for a token that never existed
    service.revoke("never-issued").await.unwrap();
}

#[tokio::test]
async fn test_revoke_all_removes_only_that_users_sessions() {
    let (_, service) = session_service();
    let user_one = Uuid::new_v4();
    let user_two = Uuid::new_v4();

    let first = service.issue(user_one).await.unwrap();
    let second = service.issue(user_one).await.unwrap();
    let other = service.issue(user_two).await.unwrap();

    let revoked = service.revoke_all(user_one).await.unwrap();

    assert_eq!(revoked, 2);
    assert_eq!(service.verify(&first).await.unwrap(), None);
    assert_eq!(service.verify(&second).await.unwrap(), None);
    assert_eq!(service.verify(&other).await.unwrap(), Some(user_two));
}

#[tokio::test]
async fn test_custom_expiry_window_is_honored() {
    let repository = Arc::new(MockSessionTokenRepository::new());
    let config = SessionServiceConfig {
        expiry_window: Duration::hours(1),
        ..Default::default()
    };
    let service = SessionService::new(repository.clone(), config);
    let user_id = Uuid::new_v4();

    seed_token_used_at(&repository, user_id, "two-hours-idle", Duration::hours(2)).await;

    assert_eq!(service.verify("two-hours-idle").await.unwrap(), None);
}

#[tokio::test]
async fn test_storage_failure_surfaces_as_error() {
    let service = SessionService::new(
        Arc::new(FailingRepository),
        SessionServiceConfig::default(),
    );

    let result = service.verify("any-token").await;

    assert!(matches!(result, Err(DomainError::Database { .. })));
}
