//! Types for gateway operation results and provider replies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::RESULT_CODE_OK;

/// Result of sending a verification code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendCodeResult {
    /// Normalised recipient number
    pub phone: String,
    /// The code that was sent and is now pending
    pub code: String,
    /// Provider business id for delivery receipts
    pub biz_id: Option<String>,
    /// Provider request id
    pub request_id: Option<String>,
    /// When the caller may request another code for this phone
    pub next_resend_at: DateTime<Utc>,
}

impl SendCodeResult {
    pub fn result_code(&self) -> u16 {
        RESULT_CODE_OK
    }
}

/// Result of a successful code verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyCodeResult {
    pub phone: String,
}

impl VerifyCodeResult {
    pub fn result_code(&self) -> u16 {
        RESULT_CODE_OK
    }
}

/// Result of a mail accepted by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendMailResult {
    pub request_id: Option<String>,
    pub env_id: Option<String>,
}

impl SendMailResult {
    pub fn result_code(&self) -> u16 {
        RESULT_CODE_OK
    }
}

/// JSON reply of the `SendSms` action
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SmsSendResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub biz_id: Option<String>,
}

impl SmsSendResponse {
    pub const CODE_OK: &'static str = "OK";

    pub fn is_ok(&self) -> bool {
        self.code.as_deref() == Some(Self::CODE_OK)
    }
}

/// JSON reply of the `SingleSendMail` action, success or error
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MailSendResponse {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub env_id: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
