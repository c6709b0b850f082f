//! SMS delivery log implementations

pub mod tracing_log;

pub use tracing_log::TracingSmsLogRepository;
