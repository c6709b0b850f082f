//! HMAC-SHA1 request signer.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::entities::SignedRequest;
use crate::errors::{GatewayError, GatewayResult};

use super::encoding::{canonical_query_string, percent_encode};

type HmacSha1 = Hmac<Sha1>;

/// HTTP method every provider request is signed for
pub const HTTP_METHOD: &str = "POST";

/// Build the signature base string: `METHOD&%2F&<encoded canonical query>`
pub fn string_to_sign(method: &str, params: &BTreeMap<String, String>) -> String {
    format!(
        "{}&{}&{}",
        method,
        percent_encode("/"),
        percent_encode(&canonical_query_string(params))
    )
}

/// Compute the `Signature` value for a parameter set
///
/// The key is `secret + "&"`; the result is the base64 of the raw HMAC-SHA1
/// digest. Deterministic for identical input.
pub fn sign(params: &BTreeMap<String, String>, secret: &str) -> GatewayResult<String> {
    sign_with_method(HTTP_METHOD, params, secret)
}

fn sign_with_method(
    method: &str,
    params: &BTreeMap<String, String>,
    secret: &str,
) -> GatewayResult<String> {
    let key = format!("{}&", secret);
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).map_err(|e| GatewayError::Internal {
        message: format!("Invalid HMAC key: {}", e),
    })?;
    mac.update(string_to_sign(method, params).as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Signs provider parameter sets with one access key pair
#[derive(Clone)]
pub struct RequestSigner {
    access_key_id: String,
    access_secret: String,
}

impl RequestSigner {
    pub fn new(access_key_id: impl Into<String>, access_secret: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            access_secret: access_secret.into(),
        }
    }

    /// Value to send as `AccessKeyId`
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Sign `params` as-is; the signature is kept outside the signed set
    pub fn sign(&self, params: BTreeMap<String, String>) -> GatewayResult<SignedRequest> {
        let signature = sign(&params, &self.access_secret)?;
        Ok(SignedRequest::new(params, signature))
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("access_key_id", &self.access_key_id)
            .field("access_secret", &"<redacted>")
            .finish()
    }
}
