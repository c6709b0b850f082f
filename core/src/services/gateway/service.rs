//! Gateway client implementation

use std::sync::Arc;
use std::time::Duration;

use vg_shared::{ProviderConfig, ThrottleConfig};

use crate::domain::entities::{CodeGenerator, SmsLogEntry, VerificationCode};
use crate::domain::value_objects::{PhoneNumber, RequestContext};
use crate::errors::{GatewayError, GatewayResult};
use crate::repositories::{CompareAndDelete, SmsLogRepository, ThrottleStore};
use crate::services::clock::{Clock, SystemClock};
use crate::services::signing::RequestSigner;
use crate::services::throttle::ThrottlePolicy;

use super::request::ProviderRequest;
use super::traits::{HttpTransport, TransportResponse};
use super::types::{
    MailSendResponse, SendCodeResult, SendMailResult, SmsSendResponse, VerifyCodeResult,
};

/// Client for the provider's SMS verification and mail APIs
///
/// Every collaborator is injected: the HTTP transport, the throttle store
/// holding cooldowns, quotas and pending codes, and the delivery log.
pub struct GatewayClient<T: HttpTransport, S: ThrottleStore, L: SmsLogRepository> {
    transport: Arc<T>,
    throttle: ThrottlePolicy<S>,
    sms_log: Arc<L>,
    signer: RequestSigner,
    provider: ProviderConfig,
    generator: CodeGenerator,
    clock: Arc<dyn Clock>,
}

impl<T: HttpTransport, S: ThrottleStore, L: SmsLogRepository> GatewayClient<T, S, L> {
    /// Create a new gateway client
    ///
    /// # Arguments
    ///
    /// * `transport` - Submits signed requests to the provider
    /// * `store` - Backs the send throttles and the pending-code cache
    /// * `sms_log` - Receives a record of every delivered code
    /// * `provider` - Credentials, endpoints and defaults
    /// * `throttle` - Limits and lifetimes
    pub fn new(
        transport: Arc<T>,
        store: Arc<S>,
        sms_log: Arc<L>,
        provider: ProviderConfig,
        throttle: ThrottleConfig,
    ) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let generator = CodeGenerator::new(throttle.code_length);
        let signer = RequestSigner::new(
            provider.access_key_id.clone(),
            provider.access_secret.clone(),
        );

        Self {
            transport,
            throttle: ThrottlePolicy::new(store, clock.clone(), throttle),
            sms_log,
            signer,
            provider,
            generator,
            clock,
        }
    }

    /// Use `clock` for throttle windows and request timestamps
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.throttle = self.throttle.with_clock(clock.clone());
        self.clock = clock;
        self
    }

    pub fn provider(&self) -> &ProviderConfig {
        &self.provider
    }

    /// Send a verification code by SMS
    ///
    /// The pipeline stops at the first failing step:
    /// 1. Validate the phone number
    /// 2. Enforce and re-arm the per-phone cooldown
    /// 3. Count the send against the phone's and the client address's quota
    /// 4. Sign and submit a `SendSms` request with `code`, or a fresh one
    /// 5. On provider success cache the code and record the delivery
    ///
    /// Throttle state written by earlier steps is kept when a later step
    /// fails. `sign_name` falls back to the configured sign name.
    pub async fn send_sms_code(
        &self,
        phone: &str,
        context: &RequestContext,
        sign_name: Option<&str>,
        code: Option<&str>,
    ) -> GatewayResult<SendCodeResult> {
        let phone = PhoneNumber::parse(phone)?;

        let next_resend_at = self.throttle.check_cooldown(&phone).await?;
        self.throttle.check_phone_quota(&phone).await?;
        self.throttle.check_ip_quota(&context.client_ip).await?;

        let code = match code.filter(|c| !c.is_empty()) {
            Some(code) => VerificationCode::new(code),
            None => self.generator.generate(),
        };
        let sign_name = sign_name
            .filter(|s| !s.is_empty())
            .unwrap_or(self.provider.captcha_sign_name.as_str());

        let request = ProviderRequest::send_sms(&self.provider, &phone, sign_name, &code)
            .sign(&self.signer, self.clock.now())?;
        let response = self
            .submit(&self.provider.sms_endpoint, &request.to_form())
            .await?;

        let reply: SmsSendResponse = serde_json::from_slice(&response.body).unwrap_or_default();
        if !reply.is_ok() {
            let message = provider_message(reply.message, reply.code, &response);
            tracing::warn!(
                phone = %phone.masked(),
                status = response.status,
                provider_message = %message,
                event = "sms_send_rejected",
                "Provider rejected SMS verification code"
            );
            return Err(GatewayError::ProviderError { message });
        }

        self.throttle.store_code(&phone, &code).await?;

        let entry =
            SmsLogEntry::verification(phone.as_str(), sign_name, code.as_str(), self.clock.now())
                .with_biz_id(reply.biz_id.clone());
        if let Err(e) = self.sms_log.write(&entry).await {
            tracing::warn!(
                phone = %phone.masked(),
                error = %e,
                event = "sms_log_write_failed",
                "Failed to record SMS delivery"
            );
        }

        tracing::info!(
            phone = %phone.masked(),
            biz_id = ?reply.biz_id,
            request_id = ?reply.request_id,
            event = "sms_code_sent",
            "Verification code sent"
        );

        Ok(SendCodeResult {
            phone: phone.as_str().to_string(),
            code: code.into_inner(),
            biz_id: reply.biz_id,
            request_id: reply.request_id,
            next_resend_at,
        })
    }

    /// Check a submitted code against the phone's pending code
    ///
    /// A match consumes the pending code, so each code verifies at most
    /// once. A mismatch leaves it pending.
    pub async fn verify_sms_code(
        &self,
        phone: &str,
        submitted: &str,
    ) -> GatewayResult<VerifyCodeResult> {
        let phone = PhoneNumber::parse(phone)?;

        match self.throttle.redeem_code(&phone, submitted).await? {
            CompareAndDelete::Deleted => {}
            CompareAndDelete::Missing => {
                tracing::info!(
                    phone = %phone.masked(),
                    event = "sms_code_expired",
                    "No pending verification code"
                );
                return Err(GatewayError::CodeExpired);
            }
            CompareAndDelete::Mismatch => {
                tracing::info!(
                    phone = %phone.masked(),
                    event = "sms_code_mismatch",
                    "Submitted verification code does not match"
                );
                return Err(GatewayError::CodeMismatch);
            }
        }

        tracing::info!(
            phone = %phone.masked(),
            event = "sms_code_verified",
            "Verification code accepted"
        );

        Ok(VerifyCodeResult {
            phone: phone.as_str().to_string(),
        })
    }

    /// Send an HTML mail from the configured DirectMail account
    ///
    /// Success is decided by the HTTP status alone; any other status yields
    /// `ProviderError` with the message from the reply body.
    pub async fn send_mail(
        &self,
        to_address: &str,
        subject: &str,
        html_body: &str,
    ) -> GatewayResult<SendMailResult> {
        let request =
            ProviderRequest::single_send_mail(&self.provider, to_address, subject, html_body)
                .sign(&self.signer, self.clock.now())?;
        let response = self
            .submit(&self.provider.mail_endpoint, &request.to_form())
            .await?;

        let reply: MailSendResponse = serde_json::from_slice(&response.body).unwrap_or_default();
        if !response.is_ok() {
            let message = provider_message(reply.message, reply.code, &response);
            tracing::warn!(
                status = response.status,
                provider_message = %message,
                event = "mail_send_rejected",
                "Provider rejected mail"
            );
            return Err(GatewayError::ProviderError { message });
        }

        tracing::info!(
            request_id = ?reply.request_id,
            env_id = ?reply.env_id,
            event = "mail_sent",
            "Mail accepted by provider"
        );

        Ok(SendMailResult {
            request_id: reply.request_id,
            env_id: reply.env_id,
        })
    }

    async fn submit(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> GatewayResult<TransportResponse> {
        let timeout = Duration::from_secs(self.provider.request_timeout_secs);
        self.transport.post_form(url, form, timeout).await.map_err(|e| {
            tracing::error!(
                url = url,
                error = %e,
                event = "provider_request_failed",
                "Provider request failed"
            );
            e
        })
    }
}

/// Error text for a rejected call: the reply's `Message`, else its `Code`,
/// else the HTTP status
fn provider_message(
    message: Option<String>,
    code: Option<String>,
    response: &TransportResponse,
) -> String {
    message
        .filter(|m| !m.is_empty())
        .or(code)
        .unwrap_or_else(|| format!("Unexpected provider response (HTTP {})", response.status))
}
