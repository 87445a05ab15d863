use crate::session::SessionId;
use crate::state::IceConnectionState;

/// Receives session-level events from an [`IcePort`](crate::port::IcePort).
///
/// Callbacks are fire-and-forget and may arrive from any receive thread or
/// from the expiry thread; they must not block and must not re-enter the
/// port's observer registration. Observers are expected to be registered
/// before traffic flows.
pub trait IcePortObserver: Send + Sync {
    /// Called on every session state transition.
    fn on_state_changed(&self, session_id: SessionId, state: IceConnectionState);

    /// Called with each authenticated application packet (DTLS, RTP, RTCP)
    /// after demultiplexing.
    fn on_data_received(&self, session_id: SessionId, data: &[u8]);
}
