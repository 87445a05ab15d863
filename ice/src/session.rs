use crate::state::IceConnectionState;
use shared::transport::Connection;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use stun::message::TransactionId;

/// Opaque stable session identifier, assigned by the signalling layer.
pub type SessionId = u64;

/// Short-term credential of one side of an offer/answer exchange, as carried
/// in `a=ice-ufrag` / `a=ice-pwd`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IceCredentials {
    pub ufrag: String,
    pub pwd: String,
}

impl IceCredentials {
    pub fn new(ufrag: impl Into<String>, pwd: impl Into<String>) -> Self {
        Self {
            ufrag: ufrag.into(),
            pwd: pwd.into(),
        }
    }
}

/// Window of outbound Binding request transaction ids kept per session.
/// Responses carrying an id outside this window are dropped.
pub(crate) const MAX_PENDING_TRANSACTIONS: usize = 7;

/// Everything the endpoint tracks for one client between `add_session` and
/// removal.
pub(crate) struct Session {
    pub(crate) session_id: SessionId,
    pub(crate) offer: IceCredentials,
    pub(crate) peer: IceCredentials,
    expire_after: Duration,
    pub(crate) inner: Mutex<SessionInner>,
}

pub(crate) struct SessionInner {
    pub(crate) state: IceConnectionState,
    /// Physical connection the first authenticated Binding request arrived
    /// on. The transport owns the connection; this handle only routes sends.
    pub(crate) remote: Option<Arc<dyn Connection>>,
    /// Peer address pinned when the session reached Checking.
    pub(crate) peer_addr: Option<SocketAddr>,
    pub(crate) expires_at: Instant,
    pub(crate) pending_transactions: Vec<TransactionId>,
}

impl Session {
    pub(crate) fn new(
        session_id: SessionId,
        offer: IceCredentials,
        peer: IceCredentials,
        expire_after: Duration,
    ) -> Self {
        Self {
            session_id,
            offer,
            peer,
            expire_after,
            inner: Mutex::new(SessionInner {
                state: IceConnectionState::New,
                remote: None,
                peer_addr: None,
                expires_at: Instant::now() + expire_after,
                pending_transactions: vec![],
            }),
        }
    }

    /// Re-arms the expiry deadline. Deadlines only move forward.
    pub(crate) fn update_binding_time(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.expires_at = Instant::now() + self.expire_after;
    }

    pub(crate) fn is_expired(&self, now: Instant) -> bool {
        now > self.inner.lock().unwrap().expires_at
    }

    pub(crate) fn state(&self) -> IceConnectionState {
        self.inner.lock().unwrap().state
    }

    pub(crate) fn peer_addr(&self) -> Option<SocketAddr> {
        self.inner.lock().unwrap().peer_addr
    }

    pub(crate) fn record_pending_transaction(&self, id: TransactionId) {
        let mut inner = self.inner.lock().unwrap();
        if inner.pending_transactions.len() >= MAX_PENDING_TRANSACTIONS {
            inner.pending_transactions.remove(0);
        }
        inner.pending_transactions.push(id);
    }

    /// Consumes a pending transaction id; false when the id was never issued
    /// or already answered.
    pub(crate) fn take_pending_transaction(&self, id: &TransactionId) -> bool {
        let mut inner = self.inner.lock().unwrap();
        match inner.pending_transactions.iter().position(|t| t == id) {
            Some(i) => {
                inner.pending_transactions.remove(i);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session(expire_after: Duration) -> Session {
        Session::new(
            7,
            IceCredentials::new("AAAAAA", "pass1"),
            IceCredentials::new("BBBBBB", "pass2"),
            expire_after,
        )
    }

    #[test]
    fn test_expiry_deadline_moves_forward() {
        let session = test_session(Duration::from_millis(100));
        let first = session.inner.lock().unwrap().expires_at;

        session.update_binding_time();
        let second = session.inner.lock().unwrap().expires_at;
        assert!(second >= first);

        assert!(!session.is_expired(first - Duration::from_millis(1)));
        assert!(session.is_expired(second + Duration::from_millis(1)));
    }

    #[test]
    fn test_pending_transaction_window() {
        let session = test_session(Duration::from_secs(1));

        let ids: Vec<TransactionId> = (0..MAX_PENDING_TRANSACTIONS + 2)
            .map(|_| TransactionId::new())
            .collect();
        for id in &ids {
            session.record_pending_transaction(*id);
        }

        // The two oldest ids fell out of the window.
        assert!(!session.take_pending_transaction(&ids[0]));
        assert!(!session.take_pending_transaction(&ids[1]));

        let last = ids[ids.len() - 1];
        assert!(session.take_pending_transaction(&last));
        // Consumed: a replayed response is rejected.
        assert!(!session.take_pending_transaction(&last));
    }
}
