//! Outbound HTTP seam of the gateway client

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::GatewayResult;

/// Raw provider reply: status code and body bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the provider answered `200 OK`
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Trait for submitting signed requests to the provider
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST `form` as `application/x-www-form-urlencoded` to `url`
    ///
    /// Any HTTP status is a successful transport result; only failures to
    /// obtain a response (connect, TLS, timeout) are errors and map to
    /// `TransportError`.
    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
        timeout: Duration,
    ) -> GatewayResult<TransportResponse>;
}
