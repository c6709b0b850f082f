//! No-op implementation of SmsLogRepository for when delivery records are not kept

use async_trait::async_trait;

use super::SmsLogRepository;
use crate::domain::entities::SmsLogEntry;
use crate::errors::GatewayResult;

/// Discards every record
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSmsLogRepository;

impl NoOpSmsLogRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SmsLogRepository for NoOpSmsLogRepository {
    async fn write(&self, _entry: &SmsLogEntry) -> GatewayResult<()> {
        Ok(())
    }
}

// Also implement for () to allow simple type defaults
#[async_trait]
impl SmsLogRepository for () {
    async fn write(&self, _entry: &SmsLogEntry) -> GatewayResult<()> {
        Ok(())
    }
}
