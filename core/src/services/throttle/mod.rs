//! Send throttles and the pending-code cache
//!
//! Three independent limits gate every SMS send:
//! - a per-phone cooldown between two sends
//! - a per-phone quota within a rolling window anchored at the first send
//! - a per-client-IP quota within the same kind of window
//!
//! The pending verification code for a phone lives in the same store.

mod keys;
mod policy;


pub use keys::ThrottleKeys;
pub use policy::ThrottlePolicy;
