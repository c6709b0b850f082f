//! Store key layout.

use std::net::IpAddr;

use vg_shared::ThrottleConfig;

use crate::domain::value_objects::PhoneNumber;

/// Builds the store keys for one throttle configuration
#[derive(Debug, Clone, Copy)]
pub struct ThrottleKeys<'a> {
    config: &'a ThrottleConfig,
}

impl<'a> ThrottleKeys<'a> {
    pub fn new(config: &'a ThrottleConfig) -> Self {
        Self { config }
    }

    /// `sendtime:<phone>`, holding the unix time of the last send
    pub fn cooldown(&self, phone: &PhoneNumber) -> String {
        self.config.make_key(&format!("sendtime:{}", phone))
    }

    /// `count:phone:<phone>`
    pub fn phone_quota(&self, phone: &PhoneNumber) -> String {
        self.config.make_key(&format!("count:phone:{}", phone))
    }

    /// `count:ip:<ip>`
    pub fn ip_quota(&self, ip: &IpAddr) -> String {
        self.config.make_key(&format!("count:ip:{}", ip))
    }

    /// `code:<phone>`, holding the pending verification code
    pub fn pending_code(&self, phone: &PhoneNumber) -> String {
        self.config.make_key(&format!("code:{}", phone))
    }
}
