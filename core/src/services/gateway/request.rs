//! Provider request construction.
//!
//! SMS and mail requests share one path: action-specific parameters are
//! collected here, the common signature parameters are added in
//! [`ProviderRequest::sign`] and the whole set goes through the same
//! [`RequestSigner`].

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use vg_shared::ProviderConfig;

use crate::domain::entities::{format_timestamp, generate_nonce, SignedRequest, VerificationCode};
use crate::domain::value_objects::PhoneNumber;
use crate::errors::GatewayResult;
use crate::services::signing::RequestSigner;

/// API version of the SMS service
pub const SMS_API_VERSION: &str = "2017-05-25";

/// API version of the DirectMail service
pub const MAIL_API_VERSION: &str = "2015-11-23";

pub const SMS_ACTION: &str = "SendSms";
pub const MAIL_ACTION: &str = "SingleSendMail";

/// An unsigned provider request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    params: BTreeMap<String, String>,
}

impl ProviderRequest {
    pub fn new(action: &str, version: &str) -> Self {
        Self {
            params: BTreeMap::new(),
        }
        .param("Action", action)
        .param("Version", version)
        .param("Format", "JSON")
    }

    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// `SendSms` carrying `code` through the verification template
    pub fn send_sms(
        provider: &ProviderConfig,
        phone: &PhoneNumber,
        sign_name: &str,
        code: &VerificationCode,
    ) -> Self {
        let template_param = serde_json::json!({ "code": code.as_str() }).to_string();

        Self::new(SMS_ACTION, SMS_API_VERSION)
            .param("PhoneNumbers", phone.as_str())
            .param("SignName", sign_name)
            .param("TemplateCode", provider.captcha_template_code.as_str())
            .param("TemplateParam", template_param)
            .param("RegionId", provider.region_id.as_str())
    }

    /// `SingleSendMail` of an HTML message from the configured account
    pub fn single_send_mail(
        provider: &ProviderConfig,
        to_address: &str,
        subject: &str,
        html_body: &str,
    ) -> Self {
        Self::new(MAIL_ACTION, MAIL_API_VERSION)
            .param("AccountName", provider.account_name.as_str())
            .param("AddressType", "1")
            .param("ReplyToAddress", "false")
            .param("ToAddress", to_address)
            .param("FromAlias", provider.from_alias.as_str())
            .param("Subject", subject)
            .param("HtmlBody", html_body)
            .param("ClickTrace", "0")
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Add the signature parameters for `at` with a fresh nonce and sign
    pub fn sign(self, signer: &RequestSigner, at: DateTime<Utc>) -> GatewayResult<SignedRequest> {
        let params = self
            .param("AccessKeyId", signer.access_key_id())
            .param("SignatureMethod", "HMAC-SHA1")
            .param("SignatureVersion", "1.0")
            .param("SignatureNonce", generate_nonce())
            .param("Timestamp", format_timestamp(at))
            .params;

        signer.sign(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn provider() -> ProviderConfig {
        ProviderConfig {
            access_key_id: "testId".to_string(),
            access_secret: "testSecret".to_string(),
            captcha_sign_name: "洛颜".to_string(),
            captcha_template_code: "SMS_71390007".to_string(),
            account_name: "noreply@mail.example.com".to_string(),
            from_alias: "Example".to_string(),
            ..ProviderConfig::default()
        }
    }

    #[test]
    fn test_sms_params() {
        let phone = PhoneNumber::parse("13812345678").unwrap();
        let request = ProviderRequest::send_sms(
            &provider(),
            &phone,
            "洛颜",
            &VerificationCode::new("123456"),
        );

        assert_eq!(request.get("Action"), Some("SendSms"));
        assert_eq!(request.get("Version"), Some("2017-05-25"));
        assert_eq!(request.get("Format"), Some("JSON"));
        assert_eq!(request.get("RegionId"), Some("cn-hangzhou"));
        assert_eq!(request.get("PhoneNumbers"), Some("13812345678"));
        assert_eq!(request.get("TemplateCode"), Some("SMS_71390007"));
        assert_eq!(request.get("TemplateParam"), Some(r#"{"code":"123456"}"#));
    }

    #[test]
    fn test_mail_params() {
        let request = ProviderRequest::single_send_mail(
            &provider(),
            "user@example.com",
            "Welcome",
            "<p>Hello</p>",
        );

        assert_eq!(request.get("Action"), Some("SingleSendMail"));
        assert_eq!(request.get("Version"), Some("2015-11-23"));
        assert_eq!(request.get("AccountName"), Some("noreply@mail.example.com"));
        assert_eq!(request.get("AddressType"), Some("1"));
        assert_eq!(request.get("ReplyToAddress"), Some("false"));
        assert_eq!(request.get("ClickTrace"), Some("0"));
        assert_eq!(request.get("HtmlBody"), Some("<p>Hello</p>"));
        assert!(request.get("RegionId").is_none());
    }

    #[test]
    fn test_sign_adds_common_params() {
        let signer = RequestSigner::new("testId", "testSecret");
        let at = Utc.with_ymd_and_hms(2017, 7, 12, 2, 42, 19).unwrap();
        let signed = ProviderRequest::new(SMS_ACTION, SMS_API_VERSION)
            .sign(&signer, at)
            .unwrap();

        assert_eq!(signed.param("AccessKeyId"), Some("testId"));
        assert_eq!(signed.param("SignatureMethod"), Some("HMAC-SHA1"));
        assert_eq!(signed.param("SignatureVersion"), Some("1.0"));
        assert_eq!(signed.param("Timestamp"), Some("2017-07-12T02:42:19Z"));
        assert_eq!(signed.param("SignatureNonce").map(str::len), Some(8));
        assert!(!signed.signature().is_empty());
    }

    #[test]
    fn test_each_request_gets_fresh_nonce() {
        let signer = RequestSigner::new("testId", "testSecret");
        let at = Utc::now();
        let first = ProviderRequest::new(MAIL_ACTION, MAIL_API_VERSION)
            .sign(&signer, at)
            .unwrap();
        let second = ProviderRequest::new(MAIL_ACTION, MAIL_API_VERSION)
            .sign(&signer, at)
            .unwrap();

        assert_ne!(first.param("SignatureNonce"), second.param("SignatureNonce"));
        assert_ne!(first.signature(), second.signature());
    }
}
