//! Mock implementation of SmsLogRepository for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::entities::SmsLogEntry;
use crate::errors::{GatewayError, GatewayResult};

use super::SmsLogRepository;

/// Mock implementation of SmsLogRepository for testing
#[derive(Clone)]
pub struct MockSmsLogRepository {
    entries: Arc<Mutex<Vec<SmsLogEntry>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockSmsLogRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Set whether writes should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap_or_else(|e| e.into_inner()) = should_fail;
    }

    /// Get all stored entries for testing
    pub fn get_all_entries(&self) -> Vec<SmsLogEntry> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Default for MockSmsLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsLogRepository for MockSmsLogRepository {
    async fn write(&self, entry: &SmsLogEntry) -> GatewayResult<()> {
        if *self.should_fail.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(GatewayError::Internal {
                message: "Mock repository error".to_string(),
            });
        }

        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(entry.clone());
        Ok(())
    }
}
