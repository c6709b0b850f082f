//! Throttle checks over a ThrottleStore.

use chrono::{DateTime, Duration, Utc};
use std::net::IpAddr;
use std::sync::Arc;

use vg_shared::ThrottleConfig;

use crate::domain::entities::VerificationCode;
use crate::domain::value_objects::PhoneNumber;
use crate::errors::{GatewayError, GatewayResult};
use crate::repositories::{CompareAndDelete, ThrottleStore};
use crate::services::clock::Clock;

use super::keys::ThrottleKeys;

/// Applies the send limits and manages the pending-code cache
pub struct ThrottlePolicy<S: ThrottleStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: ThrottleConfig,
}

impl<S: ThrottleStore> ThrottlePolicy<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, config: ThrottleConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Replace the time source used for windows and timestamps
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }

    pub fn keys(&self) -> ThrottleKeys<'_> {
        ThrottleKeys::new(&self.config)
    }

    /// Reject a send inside the cooldown, otherwise arm the cooldown
    ///
    /// Returns the earliest instant the next send for this phone is allowed.
    /// A missing or unreadable timestamp counts as no previous send.
    pub async fn check_cooldown(&self, phone: &PhoneNumber) -> GatewayResult<DateTime<Utc>> {
        let key = self.keys().cooldown(phone);
        let now = self.clock.now();
        let cooldown = self.config.cooldown_seconds as i64;

        let last_send = self
            .store
            .get(&key)
            .await?
            .and_then(|value| value.trim().parse::<i64>().ok());

        if let Some(last_send) = last_send {
            let allowed_at = last_send.saturating_add(cooldown);
            if allowed_at > now.timestamp() {
                let retry_after_seconds = (allowed_at - now.timestamp()) as u64;
                tracing::warn!(
                    phone = %phone.masked(),
                    retry_after_seconds = retry_after_seconds,
                    event = "send_cooldown_active",
                    "SMS code requested again inside the cooldown"
                );
                return Err(GatewayError::TooFrequent {
                    retry_after_seconds,
                });
            }
        }

        self.store
            .set(&key, &now.timestamp().to_string(), self.config.cooldown_seconds)
            .await?;

        Ok(now + Duration::seconds(cooldown))
    }

    /// Count this send against the phone's quota
    pub async fn check_phone_quota(&self, phone: &PhoneNumber) -> GatewayResult<i64> {
        let limit = self.config.max_sends_per_phone;
        let count = self
            .store
            .increment(&self.keys().phone_quota(phone), self.config.quota_window_seconds)
            .await?;

        if count > i64::from(limit) {
            tracing::warn!(
                phone = %phone.masked(),
                count = count,
                limit = limit,
                event = "phone_quota_exceeded",
                "SMS quota exhausted for phone number"
            );
            return Err(GatewayError::PhoneQuotaExceeded { limit });
        }

        Ok(count)
    }

    /// Count this send against the client address's quota
    pub async fn check_ip_quota(&self, ip: &IpAddr) -> GatewayResult<i64> {
        let limit = self.config.max_sends_per_ip;
        let count = self
            .store
            .increment(&self.keys().ip_quota(ip), self.config.quota_window_seconds)
            .await?;

        if count > i64::from(limit) {
            tracing::warn!(
                client_ip = %ip,
                count = count,
                limit = limit,
                event = "ip_quota_exceeded",
                "SMS quota exhausted for client address"
            );
            return Err(GatewayError::IpQuotaExceeded { limit });
        }

        Ok(count)
    }

    /// Cache `code` as the phone's pending code, replacing any earlier one
    pub async fn store_code(
        &self,
        phone: &PhoneNumber,
        code: &VerificationCode,
    ) -> GatewayResult<()> {
        self.store
            .set(
                &self.keys().pending_code(phone),
                code.as_str(),
                self.config.code_ttl_seconds,
            )
            .await
    }

    /// Consume the phone's pending code if `submitted` matches it
    ///
    /// The match and the removal are a single store operation, so a code is
    /// redeemed at most once even under concurrent verifies. A mismatch
    /// leaves the pending code in place.
    pub async fn redeem_code(
        &self,
        phone: &PhoneNumber,
        submitted: &str,
    ) -> GatewayResult<CompareAndDelete> {
        self.store
            .compare_and_delete(&self.keys().pending_code(phone), submitted)
            .await
    }
}
