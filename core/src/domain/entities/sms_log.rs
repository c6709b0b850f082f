//! Delivery record of a successfully sent verification SMS.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One delivered verification SMS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsLogEntry {
    /// Recipient phone number
    pub phone: String,
    /// Rendered message text as the recipient sees it
    pub content: String,
    /// The verification code that was sent
    pub code: String,
    /// Provider business id for delivery receipts, when returned
    pub biz_id: Option<String>,
    pub sent_at: DateTime<Utc>,
}

impl SmsLogEntry {
    /// Build the record for a verification code sent under `sign_name`
    pub fn verification(
        phone: impl Into<String>,
        sign_name: &str,
        code: impl Into<String>,
        sent_at: DateTime<Utc>,
    ) -> Self {
        let code = code.into();
        Self {
            phone: phone.into(),
            content: render_verification_content(sign_name, &code),
            code,
            biz_id: None,
            sent_at,
        }
    }

    pub fn with_biz_id(mut self, biz_id: Option<String>) -> Self {
        self.biz_id = biz_id;
        self
    }
}

/// Message text of the verification template
pub fn render_verification_content(sign_name: &str, code: &str) -> String {
    format!(
        "【{}】您的验证码是：{}，此验证码30分钟内有效，请勿泄露给他人。若非本人操作，请忽略此短信。",
        sign_name, code
    )
}
