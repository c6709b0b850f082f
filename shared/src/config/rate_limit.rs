//! Throttle and verification-code lifetime configuration

use serde::{Deserialize, Serialize};

/// Limits applied to SMS code sends, plus the pending-code lifetime
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThrottleConfig {
    /// Minimum seconds between two sends to the same phone number
    #[serde(default = "default_cooldown")]
    pub cooldown_seconds: u64,

    /// Length of the per-phone / per-IP quota window in seconds
    #[serde(default = "default_quota_window")]
    pub quota_window_seconds: u64,

    /// Max SMS sends per phone number per window
    #[serde(default = "default_max_per_phone")]
    pub max_sends_per_phone: u32,

    /// Max SMS sends per client IP per window
    #[serde(default = "default_max_per_ip")]
    pub max_sends_per_ip: u32,

    /// Lifetime of a pending verification code in seconds
    #[serde(default = "default_code_ttl")]
    pub code_ttl_seconds: u64,

    /// Number of digits in a generated code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Optional prefix for every throttle key
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: default_cooldown(),
            quota_window_seconds: default_quota_window(),
            max_sends_per_phone: default_max_per_phone(),
            max_sends_per_ip: default_max_per_ip(),
            code_ttl_seconds: default_code_ttl(),
            code_length: default_code_length(),
            key_prefix: None,
        }
    }
}

impl ThrottleConfig {
    /// Create from `THROTTLE_*` environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cooldown_seconds: env_or("THROTTLE_COOLDOWN_SECONDS", defaults.cooldown_seconds),
            quota_window_seconds: env_or(
                "THROTTLE_QUOTA_WINDOW_SECONDS",
                defaults.quota_window_seconds,
            ),
            max_sends_per_phone: env_or(
                "THROTTLE_MAX_SENDS_PER_PHONE",
                defaults.max_sends_per_phone,
            ),
            max_sends_per_ip: env_or("THROTTLE_MAX_SENDS_PER_IP", defaults.max_sends_per_ip),
            code_ttl_seconds: env_or("THROTTLE_CODE_TTL_SECONDS", defaults.code_ttl_seconds),
            code_length: env_or("THROTTLE_CODE_LENGTH", defaults.code_length),
            key_prefix: std::env::var("THROTTLE_KEY_PREFIX").ok(),
        }
    }

    /// Set the key prefix for all throttle keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a throttle key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn default_cooldown() -> u64 {
    60 // 1 minute
}

fn default_quota_window() -> u64 {
    86_400 // 1 day
}

fn default_max_per_phone() -> u32 {
    5
}

fn default_max_per_ip() -> u32 {
    10
}

fn default_code_ttl() -> u64 {
    1_800 // 30 minutes
}

fn default_code_length() -> usize {
    6
}
