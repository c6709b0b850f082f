//! reqwest-backed HttpTransport.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use vg_core::errors::GatewayResult;
use vg_core::{HttpTransport, TransportResponse};
use vg_shared::ProviderConfig;

use crate::InfrastructureError;

/// Submits signed provider requests as form POSTs
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build an HTTP client with the provider's timeout and TLS settings
    ///
    /// With `verify_tls` off, invalid certificate chains are accepted, as
    /// some legacy deployments require.
    pub fn new(provider: &ProviderConfig) -> Result<Self, InfrastructureError> {
        if !provider.verify_tls {
            tracing::warn!("TLS certificate verification disabled for provider requests");
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(provider.request_timeout_secs))
            .danger_accept_invalid_certs(!provider.verify_tls)
            .build()?;

        Ok(Self { client })
    }

    /// Use an already configured client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
        timeout: Duration,
    ) -> GatewayResult<TransportResponse> {
        debug!(url = url, fields = form.len(), "Submitting provider request");

        let response = self
            .client
            .post(url)
            .timeout(timeout)
            .form(form)
            .send()
            .await
            .map_err(InfrastructureError::from)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(InfrastructureError::from)?;

        debug!(url = url, status = status, bytes = body.len(), "Provider responded");

        Ok(TransportResponse::new(status, body.to_vec()))
    }
}
