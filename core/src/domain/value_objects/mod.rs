//! Value objects representing immutable domain concepts.

pub mod phone_number;
pub mod request_context;

// Re-export commonly used types
pub use phone_number::PhoneNumber;
pub use request_context::RequestContext;
