//! SmsLogRepository trait definition.

use async_trait::async_trait;

use crate::domain::entities::SmsLogEntry;
use crate::errors::GatewayResult;

/// Sink for delivery records of successfully sent SMS codes
#[async_trait]
pub trait SmsLogRepository: Send + Sync {
    /// Persist one delivery record
    async fn write(&self, entry: &SmsLogEntry) -> GatewayResult<()>;
}
