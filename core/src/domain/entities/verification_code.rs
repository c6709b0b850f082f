//! Verification code entity for SMS-based verification.

use rand::Rng;
use std::fmt;

/// Length of a generated verification code
pub const CODE_LENGTH: usize = 6;

/// Lifetime of a pending verification code (30 minutes)
pub const CODE_TTL_SECONDS: u64 = 1_800;

/// A one-time numeric code sent to a phone number
///
/// A code is `Pending` while it sits in the throttle store under its phone's
/// key. It becomes `Consumed` when a verification matches (the key is
/// deleted) or `Expired` when the key's TTL elapses. Only a fresh send makes
/// a phone `Pending` again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Wrap a caller-supplied or previously cached code
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Produces fresh random numeric codes
///
/// Codes are a UX convenience, not a security token, but digits are still
/// drawn from the OS-seeded thread RNG so they are never predictable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeGenerator {
    length: usize,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(CODE_LENGTH)
    }
}

impl CodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Generate a code of `length` digits, each uniform over `0-9`
    pub fn generate(&self) -> VerificationCode {
        let mut rng = rand::thread_rng();
        let code: String = (0..self.length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect();
        VerificationCode(code)
    }
}
