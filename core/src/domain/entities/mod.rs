//! Domain entities representing core gateway objects.

pub mod signed_request;
pub mod sms_log;
pub mod verification_code;

// Re-export commonly used types
pub use signed_request::{
    format_timestamp, generate_nonce, SignedRequest, NONCE_LENGTH, SIGNATURE_FIELD,
};
pub use sms_log::{render_verification_content, SmsLogEntry};
pub use verification_code::{
    CodeGenerator, VerificationCode, CODE_LENGTH, CODE_TTL_SECONDS,
};
