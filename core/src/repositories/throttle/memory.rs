//! In-process ThrottleStore with lazily checked expiry.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::{GatewayError, GatewayResult};
use crate::services::clock::{Clock, SystemClock};

use super::{CompareAndDelete, ThrottleStore};

/// Longest expiry the store tracks; larger TTLs are clamped
const MAX_TTL_SECONDS: u64 = 10 * 365 * 86_400;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

impl Entry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// ThrottleStore kept in a process-local map
///
/// Each entry stores its expiry instant; reads compare it against the
/// injected [`Clock`] and drop the entry once it has passed. Suitable for a
/// single process and for tests driven by a `ManualClock`.
pub struct InMemoryThrottleStore {
    entries: Mutex<HashMap<String, Entry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryThrottleStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Drop every expired entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .lock()
            .await
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn expiry(&self, ttl_seconds: u64) -> DateTime<Utc> {
        self.clock.now() + Duration::seconds(ttl_seconds.min(MAX_TTL_SECONDS) as i64)
    }
}

impl Default for InMemoryThrottleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ThrottleStore for InMemoryThrottleStore {
    async fn get(&self, key: &str) -> GatewayResult<Option<String>> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().await;

        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> GatewayResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: self.expiry(ttl_seconds),
        };
        self.entries.lock().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> GatewayResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn compare_and_delete(
        &self,
        key: &str,
        expected: &str,
    ) -> GatewayResult<CompareAndDelete> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().await;

        let outcome = match entries.get(key) {
            Some(entry) if !entry.is_live(now) => {
                entries.remove(key);
                CompareAndDelete::Missing
            }
            Some(entry)
                if entry.value.len() == expected.len()
                    && constant_time_eq(entry.value.as_bytes(), expected.as_bytes()) =>
            {
                entries.remove(key);
                CompareAndDelete::Deleted
            }
            Some(_) => CompareAndDelete::Mismatch,
            None => CompareAndDelete::Missing,
        };

        Ok(outcome)
    }

    async fn increment(&self, key: &str, ttl_seconds: u64) -> GatewayResult<i64> {
        let now = self.clock.now();
        let expires_at = self.expiry(ttl_seconds);
        let mut entries = self.entries.lock().await;

        let entry = entries.entry(key.to_string()).or_insert_with(|| Entry {
            value: "0".to_string(),
            expires_at,
        });
        if !entry.is_live(now) {
            entry.value = "0".to_string();
            entry.expires_at = expires_at;
        }

        let current: i64 = entry.value.trim().parse().map_err(|_| GatewayError::Store {
            message: format!("Value at {} is not an integer", key),
        })?;
        let next = current + 1;
        entry.value = next.to_string();
        Ok(next)
    }
}
