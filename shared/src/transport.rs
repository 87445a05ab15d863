use crate::error::Result;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

/// Type of transport protocol, either UDP or TCP
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransportProtocol {
    /// UDP
    #[default]
    UDP,
    /// TCP
    TCP,
}

impl fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::UDP => write!(f, "UDP"),
            Self::TCP => write!(f, "TCP"),
        }
    }
}

/// Stable identifier of a physical connection, unique within one transport.
pub type ConnectionId = u64;

/// Why a connection went away.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DisconnectReason {
    /// The local side closed the connection.
    LocalClosed,
    /// The peer closed the connection.
    PeerClosed,
    /// The connection died with a transport-level error.
    Error,
}

/// A physical connection handle.
///
/// For UDP this is the bound server socket and the peer address varies per
/// datagram; for TCP this is one accepted stream and the peer address is the
/// remote endpoint.
pub trait Connection: Send + Sync {
    fn id(&self) -> ConnectionId;

    fn transport_protocol(&self) -> TransportProtocol;

    fn local_addr(&self) -> SocketAddr;

    /// Best-effort, non-blocking send. Returns whether the bytes were handed
    /// to the kernel.
    fn send_to(&self, peer_addr: SocketAddr, data: &[u8]) -> bool;

    fn close(&self);
}

/// Events a transport delivers to its observer.
///
/// Callbacks may arrive from any thread, but `on_data_received` calls for one
/// TCP connection are never concurrent with each other.
pub trait TransportObserver: Send + Sync {
    /// A TCP client connected to one of the listening ports.
    fn on_connected(&self, conn: Arc<dyn Connection>);

    fn on_data_received(&self, conn: &Arc<dyn Connection>, peer_addr: SocketAddr, data: &[u8]);

    fn on_disconnected(&self, conn: &Arc<dyn Connection>, reason: DisconnectReason);
}

/// Abstracts physical port creation. The transport owns all sockets and their
/// I/O scheduling; the ICE endpoint only consumes events and issues sends.
pub trait Transport: Send + Sync {
    /// Binds a server socket (UDP) or listener (TCP) on `local_addr` and
    /// routes its events to `observer`.
    fn create_port(
        &self,
        local_addr: SocketAddr,
        protocol: TransportProtocol,
        observer: Arc<dyn TransportObserver>,
    ) -> Result<Arc<dyn Connection>>;

    /// Tears down a port previously returned by [`Transport::create_port`],
    /// releasing its observer registration.
    fn delete_port(&self, conn: &Arc<dyn Connection>) -> bool;
}
