//! HTTP transport for the provider endpoints

pub mod transport;


pub use transport::ReqwestTransport;
