//! Delivery records emitted as structured tracing events.

use async_trait::async_trait;

use vg_core::errors::GatewayResult;
use vg_core::{SmsLogEntry, SmsLogRepository};
use vg_shared::phone::mask_phone_number;

/// Mask used in place of the code inside logged message text
const CODE_MASK: &str = "******";

/// Writes each delivery as an `info` event on the `sms_delivery` target
///
/// The phone number is masked and the code is blanked out of the rendered
/// message text, so records can go to ordinary log sinks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSmsLogRepository;

impl TracingSmsLogRepository {
    pub fn new() -> Self {
        Self
    }

    /// Message text with the code replaced by a mask
    pub fn redacted_content(entry: &SmsLogEntry) -> String {
        if entry.code.is_empty() {
            entry.content.clone()
        } else {
            entry.content.replace(&entry.code, CODE_MASK)
        }
    }
}

#[async_trait]
impl SmsLogRepository for TracingSmsLogRepository {
    async fn write(&self, entry: &SmsLogEntry) -> GatewayResult<()> {
        tracing::info!(
            target: "sms_delivery",
            phone = %mask_phone_number(&entry.phone),
            biz_id = ?entry.biz_id,
            sent_at = %entry.sent_at.to_rfc3339(),
            content = %Self::redacted_content(entry),
            event = "sms_delivered",
            "SMS delivery recorded"
        );
        Ok(())
    }
}
