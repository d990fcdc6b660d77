//! Tests for the in-memory revocation store

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use crate::repositories::{InMemoryRevocationStore, RevocationStore};

fn at(seconds: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
}

#[tokio::test]
async fn test_mark_consumed_is_insert_if_absent() {
    let store = InMemoryRevocationStore::new();

    assert!(!store.is_consumed("cred-1").await.unwrap());
    assert!(store.mark_consumed("cred-1", at(15)).await.unwrap());
    assert!(store.is_consumed("cred-1").await.unwrap());

    // second mark is a no-op
    assert!(!store.mark_consumed("cred-1", at(30)).await.unwrap());
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_second_mark_keeps_original_deadline() {
    let store = InMemoryRevocationStore::new();
    store.mark_consumed("cred-1", at(15)).await.unwrap();
    store.mark_consumed("cred-1", at(30)).await.unwrap();

    assert_eq!(store.sweep(at(15)).await.unwrap(), 1);
    assert!(!store.is_consumed("cred-1").await.unwrap());
}

#[tokio::test]
async fn test_sweep_never_removes_early() {
    let store = InMemoryRevocationStore::new();
    store.mark_consumed("early", at(10)).await.unwrap();
    store.mark_consumed("late", at(20)).await.unwrap();

    assert_eq!(store.sweep(at(9)).await.unwrap(), 0);
    assert_eq!(store.count().await.unwrap(), 2);

    // a record is removable exactly at its deadline
    assert_eq!(store.sweep(at(10)).await.unwrap(), 1);
    assert!(!store.is_consumed("early").await.unwrap());
    assert!(store.is_consumed("late").await.unwrap());

    assert_eq!(store.sweep(at(19) + Duration::milliseconds(999)).await.unwrap(), 0);
    assert_eq!(store.sweep(at(25)).await.unwrap(), 1);
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_marks_have_single_winner() {
    let store = Arc::new(InMemoryRevocationStore::new());

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.mark_consumed("contested", at(15)).await.unwrap() })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(store.count().await.unwrap(), 1);
}
