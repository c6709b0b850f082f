//! Gateway client for SMS verification codes and transactional mail
//!
//! This module provides:
//! - `send_sms_code`: throttled delivery of a verification code
//! - `verify_sms_code`: single-use verification of a pending code
//! - `send_mail`: HTML mail through the DirectMail API
//! - the `HttpTransport` seam the provider calls go through

mod request;
mod service;
mod traits;
mod types;


pub use request::{ProviderRequest, MAIL_API_VERSION, SMS_API_VERSION};
pub use service::GatewayClient;
pub use traits::{HttpTransport, TransportResponse};
pub use types::{
    MailSendResponse, SendCodeResult, SendMailResult, SmsSendResponse, VerifyCodeResult,
};
