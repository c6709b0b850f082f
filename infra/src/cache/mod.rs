//! Cache module for the Redis-backed throttle store
//!
//! Provides the Redis client with connection retries and the
//! `ThrottleStore` implementation built on top of it.

pub mod redis_client;
pub mod throttle_store;


pub use redis_client::RedisClient;
pub use throttle_store::RedisThrottleStore;

// Re-export commonly used types
pub use vg_shared::CacheConfig;
