//! Redis-backed ThrottleStore.

use async_trait::async_trait;

use vg_core::errors::GatewayResult;
use vg_core::repositories::{CompareAndDelete, ThrottleStore};

use super::RedisClient;

/// ThrottleStore on Redis native key expiry
///
/// Counters use `INCR` with `EXPIRE` in the same script, issued only while
/// the counter has no expiry, so the quota window is anchored at the first
/// send. Pending codes are redeemed with a scripted compare-and-delete.
#[derive(Clone)]
pub struct RedisThrottleStore {
    client: RedisClient,
}

impl RedisThrottleStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

#[async_trait]
impl ThrottleStore for RedisThrottleStore {
    async fn get(&self, key: &str) -> GatewayResult<Option<String>> {
        Ok(self.client.get(key).await?)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> GatewayResult<()> {
        Ok(self.client.set_with_expiry(key, value, ttl_seconds).await?)
    }

    async fn delete(&self, key: &str) -> GatewayResult<()> {
        self.client.delete(key).await?;
        Ok(())
    }

    async fn compare_and_delete(
        &self,
        key: &str,
        expected: &str,
    ) -> GatewayResult<CompareAndDelete> {
        Ok(self.client.compare_and_delete(key, expected).await?)
    }

    async fn increment(&self, key: &str, ttl_seconds: u64) -> GatewayResult<i64> {
        Ok(self.client.increment(key, ttl_seconds).await?)
    }
}
