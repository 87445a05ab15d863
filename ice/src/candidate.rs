use shared::transport::TransportProtocol;
use std::fmt;
use std::net::SocketAddr;

/// One published ICE candidate.
///
/// The endpoint only uses the candidate list to decide which physical ports
/// to open; candidates differing only by interface share one port. The list
/// is immutable once published.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IceCandidate {
    pub transport: TransportProtocol,
    pub address: SocketAddr,
}

impl IceCandidate {
    pub fn new(transport: TransportProtocol, address: SocketAddr) -> Self {
        Self { transport, address }
    }
}

impl fmt::Display for IceCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.transport)
    }
}
