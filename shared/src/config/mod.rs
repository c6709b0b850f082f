//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis connection for the throttle store
//! - `environment` - Environment detection and logging configuration
//! - `provider` - Cloud provider credentials and endpoints
//! - `rate_limit` - Cooldown, quotas and verification-code lifetime

pub mod cache;
pub mod environment;
pub mod provider;
pub mod rate_limit;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

// Re-export commonly used types
pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use provider::ProviderConfig;
pub use rate_limit::ThrottleConfig;

/// Prefix for environment overrides layered on top of a config file
const ENV_OVERRIDE_PREFIX: &str = "GATEWAY";

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Complete gateway configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Provider credentials and endpoints
    pub provider: ProviderConfig,

    /// Throttle limits
    #[serde(default)]
    pub throttle: ThrottleConfig,

    /// Redis configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GatewayConfig {
    /// Load configuration from the process environment
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        Self {
            environment,
            provider: ProviderConfig::from_env(),
            throttle: ThrottleConfig::from_env(),
            cache: CacheConfig::from_env(),
            logging: LoggingConfig::for_environment(environment).with_env_overrides(),
        }
    }

    /// Load configuration from a file, with `GATEWAY_<SECTION>__<KEY>`
    /// environment variables taking precedence
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()).required(true))
            .add_source(::config::Environment::with_prefix(ENV_OVERRIDE_PREFIX).separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Reject configurations that cannot produce valid provider requests
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.access_key_id.trim().is_empty() {
            return Err(ConfigError::Missing("provider.access_key_id"));
        }
        if self.provider.access_secret.is_empty() {
            return Err(ConfigError::Missing("provider.access_secret"));
        }
        if self.provider.captcha_template_code.trim().is_empty() {
            return Err(ConfigError::Missing("provider.captcha_template_code"));
        }
        if self.provider.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "provider.request_timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.throttle.code_length == 0 {
            return Err(ConfigError::Invalid {
                field: "throttle.code_length",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
