//! # Verification Gateway Core
//!
//! Domain layer for the verification-code and mail dispatch gateway.
//! This crate contains the domain types, the provider request signer, the
//! throttle policy, the collaborator interfaces (throttle store, HTTP
//! transport, delivery log, clock) and the [`GatewayClient`] that
//! orchestrates them.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::{
    CompareAndDelete, InMemoryThrottleStore, MockSmsLogRepository, NoOpSmsLogRepository,
    SmsLogRepository, ThrottleStore,
};
pub use services::{
    Clock, GatewayClient, HttpTransport, ManualClock, RequestSigner, SendCodeResult,
    SendMailResult, SystemClock, ThrottlePolicy, TransportResponse, VerifyCodeResult,
};
