//! Business services containing the gateway's domain logic.

pub mod clock;
pub mod gateway;
pub mod signing;
pub mod throttle;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use gateway::{
    GatewayClient, HttpTransport, SendCodeResult, SendMailResult, TransportResponse,
    VerifyCodeResult,
};
pub use signing::{canonical_query_string, percent_encode, sign, RequestSigner};
pub use throttle::{ThrottleKeys, ThrottlePolicy};
