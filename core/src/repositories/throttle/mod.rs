//! Throttle store module.

mod r#trait;
pub use r#trait::{CompareAndDelete, ThrottleStore};

mod memory;
pub use memory::InMemoryThrottleStore;

#[cfg(test)]
mod tests;
