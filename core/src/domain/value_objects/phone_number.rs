//! Validated mainland-China mobile number.

use std::fmt;

use vg_shared::phone::{mask_phone_number, normalize_chinese_mobile};

use crate::errors::{GatewayError, GatewayResult};

/// An 11-digit mobile number that passed validation
///
/// The only way to obtain a `PhoneNumber` is [`PhoneNumber::parse`], so any
/// value of this type is known to match `^1[3-9]\d{9}$`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Coerce raw input to its numeric form and validate it
    ///
    /// Leading whitespace, a `+` sign and leading zeros are dropped and
    /// anything after the first non-digit is ignored before matching.
    pub fn parse(raw: &str) -> GatewayResult<Self> {
        normalize_chinese_mobile(raw)
            .map(PhoneNumber)
            .ok_or(GatewayError::InvalidPhone)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masked form for logs, e.g. `138****5678`
    pub fn masked(&self) -> String {
        mask_phone_number(&self.0)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
