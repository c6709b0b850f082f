//! # Infrastructure Layer
//!
//! Concrete collaborators for the verification gateway:
//! - **Cache**: Redis client and the Redis-backed `ThrottleStore`
//! - **HTTP**: reqwest-backed `HttpTransport` for the provider endpoints
//! - **SMS log**: tracing-backed delivery record sink
//!
//! [`build_gateway`] wires them into a ready `GatewayClient` from a
//! `GatewayConfig`.

use std::sync::Arc;

use vg_core::errors::GatewayError;
use vg_core::GatewayClient;
use vg_shared::GatewayConfig;

/// Cache module - Redis client and throttle store
pub mod cache;

/// HTTP module - provider transport
pub mod http;

/// SMS delivery log implementations
pub mod sms_log;

pub use cache::{RedisClient, RedisThrottleStore};
pub use http::ReqwestTransport;
pub use sms_log::TracingSmsLogRepository;

/// Gateway client as wired for production
pub type DefaultGatewayClient =
    GatewayClient<ReqwestTransport, RedisThrottleStore, TracingSmsLogRepository>;

/// Build a gateway client backed by Redis and reqwest
///
/// Validates the configuration, connects to Redis (with the configured
/// retries) and builds the HTTP client.
pub async fn build_gateway(
    config: &GatewayConfig,
) -> Result<DefaultGatewayClient, InfrastructureError> {
    config
        .validate()
        .map_err(|e| InfrastructureError::Config(e.to_string()))?;

    tracing::info!(
        environment = %config.environment,
        sms_endpoint = %config.provider.sms_endpoint,
        mail_endpoint = %config.provider.mail_endpoint,
        "Initializing verification gateway..."
    );

    let redis = RedisClient::new(config.cache.clone()).await?;
    let store = Arc::new(RedisThrottleStore::new(redis));
    let transport = Arc::new(ReqwestTransport::new(&config.provider)?);
    let sms_log = Arc::new(TracingSmsLogRepository::new());

    tracing::info!("Verification gateway initialized successfully");

    Ok(GatewayClient::new(
        transport,
        store,
        sms_log,
        config.provider.clone(),
        config.throttle.clone(),
    ))
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for the provider endpoints
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for GatewayError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Cache(e) => GatewayError::Store {
                message: e.to_string(),
            },
            InfrastructureError::Http(e) => GatewayError::TransportError {
                message: e.to_string(),
            },
            InfrastructureError::Config(message) | InfrastructureError::General(message) => {
                GatewayError::Internal { message }
            }
        }
    }
}
