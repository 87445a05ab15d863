use crate::tcp_demux::DEFAULT_MAX_FRAME_SIZE;
use std::time::Duration;

pub(crate) const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(30);
pub(crate) const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(1);

/// Collects the policy knobs of an [`IcePort`](crate::port::IcePort).
#[derive(Debug, Clone)]
pub struct IcePortConfig {
    /// How long a session may go without an authenticated Binding request
    /// before it is expired. Armed at `add_session`, re-armed on every
    /// authenticated request.
    pub session_timeout: Duration,

    /// Cadence of the expiry sweep. Independent of the deadline.
    pub check_interval: Duration,

    /// Reject Binding requests whose USERNAME names a remote ufrag other
    /// than the one from the answer SDP. Off by default: answers produced by
    /// incomplete SDP parsing may still carry a stale ufrag.
    pub strict_username_check: bool,

    /// Cap on one STUN or ChannelData frame read from a TCP stream. A frame
    /// announcing more closes the connection.
    pub max_tcp_frame_size: usize,
}

impl Default for IcePortConfig {
    fn default() -> Self {
        Self {
            session_timeout: DEFAULT_SESSION_TIMEOUT,
            check_interval: DEFAULT_CHECK_INTERVAL,
            strict_username_check: false,
            max_tcp_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}
