//! Cloud provider (Aliyun SMS / DirectMail) configuration

use serde::{Deserialize, Serialize};

/// Default Aliyun SMS endpoint
pub const DEFAULT_SMS_ENDPOINT: &str = "https://dysmsapi.aliyuncs.com/";

/// Default Aliyun DirectMail endpoint
pub const DEFAULT_MAIL_ENDPOINT: &str = "https://dm.aliyuncs.com/";

/// Credentials and endpoints used to sign and submit provider requests
#[derive(Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Access key id sent as `AccessKeyId`
    pub access_key_id: String,

    /// Access key secret, used only as the HMAC key
    pub access_secret: String,

    /// Default SMS sign name when the caller does not supply one
    pub captcha_sign_name: String,

    /// SMS template code for verification codes
    pub captcha_template_code: String,

    /// DirectMail sender account
    #[serde(default)]
    pub account_name: String,

    /// DirectMail sender display name
    #[serde(default)]
    pub from_alias: String,

    #[serde(default = "default_sms_endpoint")]
    pub sms_endpoint: String,

    #[serde(default = "default_mail_endpoint")]
    pub mail_endpoint: String,

    #[serde(default = "default_region_id")]
    pub region_id: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Verify the provider's TLS certificate chain
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
}

// The secret must never end up in logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("access_key_id", &self.access_key_id)
            .field("access_secret", &"<redacted>")
            .field("captcha_sign_name", &self.captcha_sign_name)
            .field("captcha_template_code", &self.captcha_template_code)
            .field("account_name", &self.account_name)
            .field("from_alias", &self.from_alias)
            .field("sms_endpoint", &self.sms_endpoint)
            .field("mail_endpoint", &self.mail_endpoint)
            .field("region_id", &self.region_id)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            access_key_id: String::new(),
            access_secret: String::new(),
            captcha_sign_name: String::new(),
            captcha_template_code: String::new(),
            account_name: String::new(),
            from_alias: String::new(),
            sms_endpoint: default_sms_endpoint(),
            mail_endpoint: default_mail_endpoint(),
            region_id: default_region_id(),
            request_timeout_secs: default_request_timeout(),
            verify_tls: default_verify_tls(),
        }
    }
}

impl ProviderConfig {
    /// Create configuration from `ALIYUN_*` environment variables
    ///
    /// Missing credentials are left empty; call [`super::GatewayConfig::validate`]
    /// to reject them.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_key_id: std::env::var("ALIYUN_ACCESS_KEY_ID").unwrap_or_default(),
            access_secret: std::env::var("ALIYUN_ACCESS_SECRET").unwrap_or_default(),
            captcha_sign_name: std::env::var("ALIYUN_SMS_SIGN_NAME").unwrap_or_default(),
            captcha_template_code: std::env::var("ALIYUN_SMS_TEMPLATE_CODE").unwrap_or_default(),
            account_name: std::env::var("ALIYUN_MAIL_ACCOUNT").unwrap_or_default(),
            from_alias: std::env::var("ALIYUN_MAIL_FROM_ALIAS").unwrap_or_default(),
            sms_endpoint: std::env::var("ALIYUN_SMS_ENDPOINT").unwrap_or(defaults.sms_endpoint),
            mail_endpoint: std::env::var("ALIYUN_MAIL_ENDPOINT").unwrap_or(defaults.mail_endpoint),
            region_id: std::env::var("ALIYUN_REGION_ID").unwrap_or(defaults.region_id),
            request_timeout_secs: std::env::var("ALIYUN_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            verify_tls: std::env::var("ALIYUN_VERIFY_TLS")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.verify_tls),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn default_sms_endpoint() -> String {
    DEFAULT_SMS_ENDPOINT.to_string()
}

fn default_mail_endpoint() -> String {
    DEFAULT_MAIL_ENDPOINT.to_string()
}

fn default_region_id() -> String {
    String::from("cn-hangzhou")
}

fn default_request_timeout() -> u64 {
    10
}

fn default_verify_tls() -> bool {
    true
}
