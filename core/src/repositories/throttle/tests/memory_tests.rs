//! Tests for the in-memory throttle store

use chrono::{TimeZone, Utc};
use std::sync::Arc;

use crate::repositories::throttle::InMemoryThrottleStore;
use crate::repositories::{CompareAndDelete, ThrottleStore};
use crate::services::clock::ManualClock;

fn store_with_clock() -> (InMemoryThrottleStore, ManualClock) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2020, 2, 12, 8, 0, 0).unwrap());
    let store = InMemoryThrottleStore::with_clock(Arc::new(clock.clone()));
    (store, clock)
}

#[tokio::test]
async fn test_set_get_delete() {
    let (store, _clock) = store_with_clock();

    assert_eq!(store.get("code:13812345678").await.unwrap(), None);

    store.set("code:13812345678", "123456", 1800).await.unwrap();
    assert_eq!(
        store.get("code:13812345678").await.unwrap(),
        Some("123456".to_string())
    );

    store.delete("code:13812345678").await.unwrap();
    assert_eq!(store.get("code:13812345678").await.unwrap(), None);

    // Deleting again is fine
    store.delete("code:13812345678").await.unwrap();
}

#[tokio::test]
async fn test_value_expires_after_ttl() {
    let (store, clock) = store_with_clock();
    store.set("sendtime:13812345678", "1581494400", 60).await.unwrap();

    clock.advance_secs(59);
    assert!(store.get("sendtime:13812345678").await.unwrap().is_some());

    clock.advance_secs(1);
    assert_eq!(store.get("sendtime:13812345678").await.unwrap(), None);
}

#[tokio::test]
async fn test_set_overwrites_value_and_ttl() {
    let (store, clock) = store_with_clock();
    store.set("code:13812345678", "111111", 10).await.unwrap();
    clock.advance_secs(5);
    store.set("code:13812345678", "222222", 10).await.unwrap();
    clock.advance_secs(8);

    assert_eq!(
        store.get("code:13812345678").await.unwrap(),
        Some("222222".to_string())
    );
}

#[tokio::test]
async fn test_increment_starts_at_one() {
    let (store, _clock) = store_with_clock();

    assert_eq!(store.increment("count:phone:13812345678", 86400).await.unwrap(), 1);
    assert_eq!(store.increment("count:phone:13812345678", 86400).await.unwrap(), 2);
    assert_eq!(
        store.get("count:phone:13812345678").await.unwrap(),
        Some("2".to_string())
    );
}

#[tokio::test]
async fn test_increment_window_anchored_at_first_write() {
    let (store, clock) = store_with_clock();

    store.increment("count:ip:10.0.0.1", 100).await.unwrap();
    clock.advance_secs(60);
    store.increment("count:ip:10.0.0.1", 100).await.unwrap();

    // Second increment must not extend the window
    clock.advance_secs(40);
    assert_eq!(store.get("count:ip:10.0.0.1").await.unwrap(), None);
    assert_eq!(store.increment("count:ip:10.0.0.1", 100).await.unwrap(), 1);
}

#[tokio::test]
async fn test_increment_rejects_non_integer() {
    let (store, _clock) = store_with_clock();
    store.set("count:phone:13812345678", "abc", 60).await.unwrap();

    let err = store.increment("count:phone:13812345678", 60).await.unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_purge_expired() {
    let (store, clock) = store_with_clock();
    store.set("a", "1", 10).await.unwrap();
    store.set("b", "2", 100).await.unwrap();
    assert_eq!(store.len().await, 2);

    clock.advance_secs(50);
    assert_eq!(store.len().await, 1);
    assert_eq!(store.purge_expired().await, 1);
    assert!(!store.is_empty().await);
}

#[tokio::test]
async fn test_compare_and_delete_outcomes() {
    let (store, clock) = store_with_clock();

    assert_eq!(
        store.compare_and_delete("code:13812345678", "123456").await.unwrap(),
        CompareAndDelete::Missing
    );

    store.set("code:13812345678", "123456", 1800).await.unwrap();
    assert_eq!(
        store.compare_and_delete("code:13812345678", "654321").await.unwrap(),
        CompareAndDelete::Mismatch
    );
    assert_eq!(
        store.compare_and_delete("code:13812345678", "12345").await.unwrap(),
        CompareAndDelete::Mismatch
    );
    assert_eq!(
        store.compare_and_delete("code:13812345678", "").await.unwrap(),
        CompareAndDelete::Mismatch
    );
    assert_eq!(
        store.get("code:13812345678").await.unwrap(),
        Some("123456".to_string())
    );

    assert_eq!(
        store.compare_and_delete("code:13812345678", "123456").await.unwrap(),
        CompareAndDelete::Deleted
    );
    assert_eq!(store.get("code:13812345678").await.unwrap(), None);

    store.set("code:13812345678", "123456", 10).await.unwrap();
    clock.advance_secs(10);
    assert_eq!(
        store.compare_and_delete("code:13812345678", "123456").await.unwrap(),
        CompareAndDelete::Missing
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_compare_and_delete_deletes_once_under_contention() {
    let store = Arc::new(InMemoryThrottleStore::new());
    store.set("code:13812345678", "123456", 1800).await.unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .compare_and_delete("code:13812345678", "123456")
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut deleted = 0;
    for handle in handles {
        if handle.await.unwrap() == CompareAndDelete::Deleted {
            deleted += 1;
        }
    }
    assert_eq!(deleted, 1);
}
