use std::fmt;

/// An enum showing the binding progress of one ICE session.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum IceConnectionState {
    /// Session registered, no connectivity check received yet.
    #[default]
    New,

    /// First authenticated Binding request arrived; the peer address is
    /// pinned and the server's own check is in flight.
    Checking,

    /// The peer answered the server's Binding request.
    Connected,

    /// The peer could not authenticate.
    Failed,

    /// No authenticated Binding request arrived within the session deadline.
    Disconnected,

    /// The enclosing port was shut down.
    Closed,
}

impl fmt::Display for IceConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Self::New => "New",
            Self::Checking => "Checking",
            Self::Connected => "Connected",
            Self::Failed => "Failed",
            Self::Disconnected => "Disconnected",
            Self::Closed => "Closed",
        };
        write!(f, "{s}")
    }
}
