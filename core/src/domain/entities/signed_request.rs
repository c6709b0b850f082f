//! Signed provider request entity.

use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use std::collections::BTreeMap;

/// Length of the `SignatureNonce` sent with every request
pub const NONCE_LENGTH: usize = 8;

/// Name of the form field carrying the signature
pub const SIGNATURE_FIELD: &str = "Signature";

/// Provider timestamp format (UTC, second precision)
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A provider request whose parameters have been signed
///
/// Built fresh for every call. The signature covers exactly `params`; it is
/// appended as a separate `Signature` field only when the request is
/// serialised for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    params: BTreeMap<String, String>,
    signature: String,
}

impl SignedRequest {
    pub fn new(params: BTreeMap<String, String>, signature: String) -> Self {
        Self { params, signature }
    }

    /// The signed parameter set, sorted by key
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Form fields to submit: every signed parameter followed by `Signature`
    pub fn to_form(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .chain(std::iter::once((
                SIGNATURE_FIELD.to_string(),
                self.signature.clone(),
            )))
            .collect()
    }
}

/// Generate a fresh alphanumeric `SignatureNonce`
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}

/// Format a timestamp the way the provider expects, e.g. `2017-07-12T02:42:19Z`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
