//! Gateway error taxonomy.
//!
//! Every public gateway operation returns a [`GatewayResult`]; nothing is
//! thrown across the crate boundary. Callers decide retry policy with
//! [`GatewayError::is_retryable`].

use thiserror::Error;

/// Result code reported for a successful operation
pub const RESULT_CODE_OK: u16 = 0;

/// Errors returned by the gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Invalid phone number")]
    InvalidPhone,

    #[error("Too many requests, retry in {retry_after_seconds} seconds")]
    TooFrequent { retry_after_seconds: u64 },

    #[error("SMS quota exceeded for this phone number (limit {limit})")]
    PhoneQuotaExceeded { limit: u32 },

    #[error("SMS quota exceeded for this client address (limit {limit})")]
    IpQuotaExceeded { limit: u32 },

    #[error("Verification code expired or never requested")]
    CodeExpired,

    #[error("Verification code does not match")]
    CodeMismatch,

    #[error("Provider error: {message}")]
    ProviderError { message: String },

    #[error("Transport error: {message}")]
    TransportError { message: String },

    #[error("Throttle store error: {message}")]
    Store { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl GatewayError {
    /// Numeric result code of the legacy wire contract
    ///
    /// Send and verify failures share the 1..=5 range, so `TooFrequent` and
    /// `CodeExpired` both map to 2 and `PhoneQuotaExceeded` and
    /// `CodeMismatch` both map to 3.
    pub fn code(&self) -> u16 {
        match self {
            GatewayError::InvalidPhone => 1,
            GatewayError::TooFrequent { .. } | GatewayError::CodeExpired => 2,
            GatewayError::PhoneQuotaExceeded { .. } | GatewayError::CodeMismatch => 3,
            GatewayError::IpQuotaExceeded { .. } => 4,
            GatewayError::ProviderError { .. } => 5,
            GatewayError::TransportError { .. } => 6,
            GatewayError::Store { .. } => 7,
            GatewayError::Internal { .. } => 8,
        }
    }

    /// Whether retrying the same call later may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::TransportError { .. } | GatewayError::Store { .. }
        )
    }

    /// Whether the call was refused by a rate limit
    pub fn is_throttled(&self) -> bool {
        matches!(
            self,
            GatewayError::TooFrequent { .. }
                | GatewayError::PhoneQuotaExceeded { .. }
                | GatewayError::IpQuotaExceeded { .. }
        )
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
