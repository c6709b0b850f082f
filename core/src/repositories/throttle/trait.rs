//! ThrottleStore trait definition.

use async_trait::async_trait;

use crate::errors::GatewayResult;

/// Outcome of [`ThrottleStore::compare_and_delete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareAndDelete {
    /// No live value under the key
    Missing,
    /// A live value that differs from the expected one; left in place
    Mismatch,
    /// The value matched and has been removed
    Deleted,
}

/// Key-value store with per-key expiry backing the send throttles and the
/// pending-code cache
///
/// Expired keys read as absent. There is no ordering guarantee across keys.
#[async_trait]
pub trait ThrottleStore: Send + Sync {
    /// Read a key, `None` when absent or expired
    async fn get(&self, key: &str) -> GatewayResult<Option<String>>;

    /// Write a key that expires after `ttl_seconds`
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> GatewayResult<()>;

    /// Remove a key; removing an absent key is not an error
    async fn delete(&self, key: &str) -> GatewayResult<()>;

    /// Remove a key only if it currently holds `expected`
    ///
    /// The read, the comparison and the removal happen as one step, so of
    /// several concurrent callers expecting the same value at most one sees
    /// [`CompareAndDelete::Deleted`].
    async fn compare_and_delete(
        &self,
        key: &str,
        expected: &str,
    ) -> GatewayResult<CompareAndDelete>;

    /// Atomically add one to an integer counter and return the new value
    ///
    /// An absent counter starts at 0. The expiry is set only when the
    /// counter is created, so the window is anchored at the first increment.
    async fn increment(&self, key: &str, ttl_seconds: u64) -> GatewayResult<i64>;
}
