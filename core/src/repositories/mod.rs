pub mod sms_log;
pub mod throttle;

pub use sms_log::{MockSmsLogRepository, NoOpSmsLogRepository, SmsLogRepository};
pub use throttle::{CompareAndDelete, InMemoryThrottleStore, ThrottleStore};
