//! Calling context of a gateway operation.

use std::net::IpAddr;

/// Information about the caller that the gateway needs for throttling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    /// Address of the end user that triggered the request
    pub client_ip: IpAddr,
}

impl RequestContext {
    pub fn new(client_ip: IpAddr) -> Self {
        Self { client_ip }
    }
}

impl From<IpAddr> for RequestContext {
    fn from(client_ip: IpAddr) -> Self {
        Self::new(client_ip)
    }
}
