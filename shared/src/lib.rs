//! Shared utilities and common types for the verification gateway
//!
//! This crate provides common functionality used across all gateway crates:
//! - Configuration types (provider credentials, throttle limits, Redis, logging)
//! - Tracing subscriber initialisation
//! - Utility functions (phone validation, masking)

pub mod config;
pub mod telemetry;
pub mod utils;

// Re-export commonly used items at crate root
pub use self::config::{
    CacheConfig, ConfigError, Environment, GatewayConfig, LogFormat, LoggingConfig,
    ProviderConfig, ThrottleConfig,
};
pub use telemetry::init_tracing;
pub use utils::phone;
