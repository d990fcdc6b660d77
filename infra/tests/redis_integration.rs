//! Integration tests for the Redis revocation store
//!
//! These tests require a running Redis instance (6.2 or newer).
//! Run with: cargo test -p sg_infra --test redis_integration -- --ignored

use std::sync::Arc;

use chrono::{Duration, Utc};
use sg_core::errors::{DomainError, TokenError};
use sg_core::repositories::RevocationStore;
use sg_core::services::{TokenService, TokenServiceConfig};
use sg_infra::cache::{RedisConfig, RedisRevocationStore};

fn test_config() -> RedisConfig {
    let mut config = RedisConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    );
    config.key_prefix = format!("test:revoked:{}:", uuid::Uuid::new_v4());
    config
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_connection() {
    let store = RedisRevocationStore::connect(&test_config()).await;
    assert!(store.is_ok(), "Failed to connect to Redis");
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_mark_consumed_is_insert_if_absent() {
    let store = RedisRevocationStore::connect(&test_config()).await.unwrap();
    let until = Utc::now() + Duration::seconds(60);

    assert!(!store.is_consumed("cred-1").await.unwrap());
    assert!(store.mark_consumed("cred-1", until).await.unwrap());
    assert!(!store.mark_consumed("cred-1", until).await.unwrap());
    assert!(store.is_consumed("cred-1").await.unwrap());
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_records_expire_at_deadline() {
    let store = RedisRevocationStore::connect(&test_config()).await.unwrap();

    store
        .mark_consumed("short-lived", Utc::now() + Duration::seconds(2))
        .await
        .unwrap();
    assert!(store.is_consumed("short-lived").await.unwrap());

    tokio::time::sleep(std::time::Duration::from_secs(3)).await;

    assert!(!store.is_consumed("short-lived").await.unwrap());
    assert_eq!(store.sweep(Utc::now()).await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore] // Requires Redis server
async fn test_concurrent_refresh_across_service_instances() {
    let config = test_config();
    let token_config = TokenServiceConfig {
        jwt_secret: "shared-secret".to_string(),
        ..TokenServiceConfig::default()
    };

    // two instances sharing one Redis
    let first = Arc::new(
        TokenService::new(
            RedisRevocationStore::connect(&config).await.unwrap(),
            token_config.clone(),
        )
        .unwrap(),
    );
    let second = Arc::new(
        TokenService::new(
            RedisRevocationStore::connect(&config).await.unwrap(),
            token_config,
        )
        .unwrap(),
    );

    let issued = first.issue("alice").unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = if i % 2 == 0 { first.clone() } else { second.clone() };
        let token = issued.token.clone();
        handles.push(tokio::spawn(async move { service.refresh(Some(&token)).await }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(DomainError::Token(TokenError::AlreadyRefreshed)) => {}
            Err(other) => panic!("unexpected refresh failure: {}", other),
        }
    }
    assert_eq!(successes, 1);
}
