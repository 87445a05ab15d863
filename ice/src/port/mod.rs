
pub mod port_config;

use crate::attributes::control::AttrControlling;
use crate::attributes::priority::PriorityAttr;
use crate::attributes::use_candidate::UseCandidateAttr;
use crate::candidate::IceCandidate;
use crate::chandata::ChannelData;
use crate::observer::IcePortObserver;
use crate::packet::{find_packet_type, PacketType};
use crate::session::{IceCredentials, Session, SessionId};
use crate::state::IceConnectionState;
use crate::tcp_demux::TcpDemultiplexer;
use log::{debug, error, info, trace, warn};
use port_config::IcePortConfig;
use shared::error::{Error, Result};
use shared::transport::{
    Connection, ConnectionId, DisconnectReason, Transport, TransportObserver, TransportProtocol,
};
use shared::util::math_rand_alpha_number;
use std::collections::HashMap;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};
use std::thread;
use std::time::Instant;
use stun::attributes::{TextAttribute, Username, ATTR_USERNAME};
use stun::integrity::MessageIntegrity;
use stun::message::{
    Message, MessageClass, TransactionId, BINDING_REQUEST, BINDING_SUCCESS, METHOD_ALLOCATE,
    METHOD_BINDING,
};
use stun::xoraddr::XorMappedAddress;

const UFRAG_LEN: usize = 6;

/// RFC 8445 §5.1.2.1 priority of a host candidate, component 1, highest
/// local preference. Advertised in the server's own checks.
const HOST_CANDIDATE_PRIORITY: u32 = (126 << 24) | (65535 << 8) | 255;

/// The two peer-keyed indexes are always mutated together, so they share one
/// critical section.
#[derive(Default)]
struct PeerIndex {
    by_address: HashMap<SocketAddr, Arc<Session>>,
    by_session_id: HashMap<SessionId, Arc<Session>>,
}

/// IcePort terminates ICE on the media-server side.
///
/// It accepts candidate traffic on the physical ports opened by
/// [`create_ice_candidates`](IcePort::create_ice_candidates), demultiplexes
/// inbound bytes into STUN, TURN ChannelData or application frames, drives
/// the STUN short-term-credential handshake that binds a signalling session
/// to a concrete peer transport address, and pumps outbound application
/// frames back through the same transport.
///
/// The negotiation it drives, per session:
///
/// ```text
/// (State: New)
/// [Server] <-- 1. Binding Request          --- [Player]
/// (State: Checking)
/// [Server] --- 2. Binding Success Response --> [Player]
/// [Server] --- 3. Binding Request          --> [Player]
/// [Server] <-- 4. Binding Success Response --- [Player]
/// (State: Connected)
/// ```
pub struct IcePort {
    config: IcePortConfig,
    transport: Arc<dyn Transport>,

    // Handle to the owning Arc, used to register the port itself as the
    // observer of the physical ports it opens.
    me: Weak<IcePort>,

    tie_breaker: u64,

    physical_ports: Mutex<Vec<Arc<dyn Connection>>>,
    candidates: Mutex<Vec<IceCandidate>>,

    observers: RwLock<Vec<Arc<dyn IcePortObserver>>>,

    // Sessions by offer ufrag, from add_session until removal.
    // Lock order: user_sessions before peer_index, never the reverse.
    user_sessions: Mutex<HashMap<String, Arc<Session>>>,
    peer_index: Mutex<PeerIndex>,

    // One demultiplexer per accepted TCP connection. Readers take the map
    // shared; connect/disconnect take it exclusive.
    demultiplexers: RwLock<HashMap<ConnectionId, Arc<Mutex<TcpDemultiplexer>>>>,

    closed: AtomicBool,
}

impl IcePort {
    /// Creates the port and starts its expiry sweep thread. The thread holds
    /// a weak handle, so dropping the returned `Arc` ends it.
    pub fn new(config: IcePortConfig, transport: Arc<dyn Transport>) -> Arc<Self> {
        let port = Arc::new_cyclic(|me| Self {
            me: me.clone(),
            tie_breaker: rand::random::<u64>(),
            transport,
            physical_ports: Mutex::new(vec![]),
            candidates: Mutex::new(vec![]),
            observers: RwLock::new(vec![]),
            user_sessions: Mutex::new(HashMap::new()),
            peer_index: Mutex::new(PeerIndex::default()),
            demultiplexers: RwLock::new(HashMap::new()),
            closed: AtomicBool::new(false),
            config,
        });

        Self::spawn_expiry_timer(&port);
        port
    }

    fn transport_observer(&self) -> Result<Arc<dyn TransportObserver>> {
        match self.me.upgrade() {
            Some(me) => Ok(me),
            None => Err(Error::ErrAlreadyClosed),
        }
    }

    fn spawn_expiry_timer(port: &Arc<Self>) {
        let weak: Weak<IcePort> = Arc::downgrade(port);
        let interval = port.config.check_interval;
        thread::spawn(move || loop {
            thread::sleep(interval);
            let Some(port) = weak.upgrade() else { break };
            if port.closed.load(Ordering::Acquire) {
                break;
            }
            port.check_timed_out_sessions(Instant::now());
        });
    }

    pub fn add_observer(&self, observer: Arc<dyn IcePortObserver>) {
        self.observers.write().unwrap().push(observer);
    }

    pub fn remove_observers(&self) {
        self.observers.write().unwrap().clear();
    }

    pub fn has_observer(&self) -> bool {
        !self.observers.read().unwrap().is_empty()
    }

    /// Binds one physical port per distinct `(port, transport)` tuple across
    /// `candidates`, on the wildcard interface. Either every port binds and
    /// the list is published, or everything opened here is closed again and
    /// the error of the failing bind is returned.
    pub fn create_ice_candidates(&self, candidates: Vec<IceCandidate>) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::ErrAlreadyClosed);
        }
        let observer = self.transport_observer()?;

        let mut ports = self.physical_ports.lock().unwrap();
        let mut bound: HashMap<(u16, TransportProtocol), bool> = HashMap::new();
        let mut result = Ok(());

        for candidate in &candidates {
            let key = (candidate.address.port(), candidate.transport);
            if bound.contains_key(&key) {
                // Already opened
                continue;
            }

            let bind_addr = wildcard_addr(candidate.address);
            match self
                .transport
                .create_port(bind_addr, candidate.transport, Arc::clone(&observer))
            {
                Ok(port) => {
                    info!("ICE port is bound to {bind_addr}/{}", candidate.transport);
                    ports.push(port);
                    bound.insert(key, true);
                }
                Err(err) => {
                    error!(
                        "could not create physical port for {bind_addr}/{}: {err}",
                        candidate.transport
                    );
                    result = Err(err);
                    break;
                }
            }
        }

        if result.is_ok() {
            *self.candidates.lock().unwrap() = candidates;
        } else {
            for port in ports.drain(..) {
                self.transport.delete_port(&port);
            }
        }

        result
    }

    /// Binds one additional listener for TURN clients, typically TCP on a
    /// well-known port. Relayed traffic reaches the regular receive path
    /// already channel-framed.
    pub fn create_turn_server(
        &self,
        address: SocketAddr,
        protocol: TransportProtocol,
    ) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::ErrAlreadyClosed);
        }

        let observer = self.transport_observer()?;
        let port = self.transport.create_port(address, protocol, observer)?;

        info!("TURN listener is bound to {address}/{protocol}");
        self.physical_ports.lock().unwrap().push(port);
        Ok(())
    }

    /// The published candidate list.
    pub fn ice_candidates(&self) -> Vec<IceCandidate> {
        self.candidates.lock().unwrap().clone()
    }

    /// Produces a 6-character alphanumeric ufrag unique among live sessions.
    pub fn generate_ufrag(&self) -> String {
        let user_sessions = self.user_sessions.lock().unwrap();
        loop {
            let ufrag = math_rand_alpha_number(UFRAG_LEN);
            if !user_sessions.contains_key(&ufrag) {
                trace!("generated ufrag: {ufrag}");
                return ufrag;
            }
        }
    }

    /// Registers a session ahead of its first connectivity check. Until that
    /// check arrives the session is reachable only by its offer ufrag.
    pub fn add_session(
        &self,
        session_id: SessionId,
        offer: IceCredentials,
        peer: IceCredentials,
    ) -> Result<()> {
        let session = {
            let mut user_sessions = self.user_sessions.lock().unwrap();
            if user_sessions.contains_key(&offer.ufrag) {
                return Err(Error::ErrDuplicateUfrag);
            }

            debug!(
                "adding session {session_id} (ufrag {}:{})",
                offer.ufrag, peer.ufrag
            );

            let ufrag = offer.ufrag.clone();
            let session = Arc::new(Session::new(
                session_id,
                offer,
                peer,
                self.config.session_timeout,
            ));
            user_sessions.insert(ufrag, Arc::clone(&session));
            session
        };

        self.notify_state_changed(&session, IceConnectionState::New);
        Ok(())
    }

    /// Removes a session from every index. Idempotent; also reaps sessions
    /// which never received a Binding request.
    pub fn remove_session(&self, session_id: SessionId) -> bool {
        let mut user_sessions = self.user_sessions.lock().unwrap();

        let session = {
            let mut index = self.peer_index.lock().unwrap();
            match index.by_session_id.remove(&session_id) {
                Some(session) => {
                    if let Some(addr) = session.peer_addr() {
                        index.by_address.remove(&addr);
                    }
                    Some(session)
                }
                None => None,
            }
        };

        match session {
            Some(session) => {
                user_sessions.remove(&session.offer.ufrag);
                true
            }
            None => {
                // The session may exist only in the ufrag table because no
                // STUN request was ever received from it.
                let before = user_sessions.len();
                user_sessions.retain(|_, s| s.session_id != session_id);
                if user_sessions.len() < before {
                    warn!("session {session_id} removed before any binding request");
                    true
                } else {
                    warn!("could not find session {session_id}");
                    false
                }
            }
        }
    }

    /// Sends application bytes to the session's peer over the transport the
    /// handshake pinned. Fails until the session has been indexed by its
    /// first authenticated Binding request.
    pub fn send(&self, session_id: SessionId, data: &[u8]) -> bool {
        let session = {
            let index = self.peer_index.lock().unwrap();
            match index.by_session_id.get(&session_id) {
                Some(session) => Arc::clone(session),
                None => return false,
            }
        };

        let (remote, peer_addr) = {
            let inner = session.inner.lock().unwrap();
            (inner.remote.clone(), inner.peer_addr)
        };

        match (remote, peer_addr) {
            (Some(remote), Some(peer_addr)) => remote.send_to(peer_addr, data),
            _ => false,
        }
    }

    /// Binding state of a session that has reached at least Checking.
    pub fn state(&self, session_id: SessionId) -> Option<IceConnectionState> {
        let index = self.peer_index.lock().unwrap();
        index.by_session_id.get(&session_id).map(|s| s.state())
    }

    /// Tears down every physical port and clears all indexes. Sessions still
    /// alive transition to Closed.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        let ports = std::mem::take(&mut *self.physical_ports.lock().unwrap());
        for port in &ports {
            self.transport.delete_port(port);
        }

        self.candidates.lock().unwrap().clear();
        self.demultiplexers.write().unwrap().clear();

        let sessions: Vec<Arc<Session>> = {
            let mut user_sessions = self.user_sessions.lock().unwrap();
            let sessions = user_sessions.drain().map(|(_, s)| s).collect();
            let mut index = self.peer_index.lock().unwrap();
            index.by_address.clear();
            index.by_session_id.clear();
            sessions
        };

        for session in sessions {
            self.set_session_state(&session, IceConnectionState::Closed);
        }
    }

    // ------------------------------------------------------------------
    // Receive path
    // ------------------------------------------------------------------

    fn process_packet(
        &self,
        conn: &Arc<dyn Connection>,
        peer_addr: SocketAddr,
        packet_type: PacketType,
        data: &[u8],
    ) {
        match packet_type {
            PacketType::TurnChannelData => self.process_channel_data_packet(conn, peer_addr, data),
            PacketType::Stun => self.process_stun_packet(conn, peer_addr, data),
            PacketType::Dtls | PacketType::RtpRtcp => {
                self.process_application_packet(peer_addr, data)
            }
            PacketType::Zrtp | PacketType::Unknown => {
                // Not supported by this endpoint.
                debug!("discarding {packet_type} packet from {peer_addr}");
            }
        }
    }

    fn process_application_packet(&self, peer_addr: SocketAddr, data: &[u8]) {
        let session = {
            let index = self.peer_index.lock().unwrap();
            index.by_address.get(&peer_addr).cloned()
        };

        let Some(session) = session else {
            debug!("could not find session for {peer_addr}, dropping");
            return;
        };

        let observers = self.observers.read().unwrap().clone();
        for observer in observers {
            observer.on_data_received(session.session_id, data);
        }
    }

    fn process_channel_data_packet(
        &self,
        conn: &Arc<dyn Connection>,
        peer_addr: SocketAddr,
        data: &[u8],
    ) {
        let message = match ChannelData::decode(data) {
            Ok(message) => message,
            Err(err) => {
                debug!("invalid ChannelData from {peer_addr}: {err}");
                return;
            }
        };

        // Decapsulate and dispatch the carried packet again.
        let packet_type = find_packet_type(&message.data);
        self.process_packet(conn, peer_addr, packet_type, &message.data);
    }

    fn process_stun_packet(&self, conn: &Arc<dyn Connection>, peer_addr: SocketAddr, data: &[u8]) {
        let message = match Message::unmarshal(data) {
            Ok(message) => message,
            Err(err) => {
                debug!("malformed STUN from {peer_addr}: {err}");
                return;
            }
        };

        trace!("received {message} from {peer_addr}");

        if message.typ.method == METHOD_BINDING {
            match message.typ.class {
                MessageClass::Request => self.process_binding_request(conn, peer_addr, &message),
                MessageClass::SuccessResponse => self.process_binding_response(peer_addr, &message),
                MessageClass::ErrorResponse => {
                    warn!("binding error response received from {peer_addr}");
                }
                MessageClass::Indication => {}
            }
        } else if message.typ.method == METHOD_ALLOCATE {
            // No relay allocation is served here; relayed traffic arrives on
            // this port already channel-framed.
            debug!("dropping {} from {peer_addr}", message.typ);
        } else {
            warn!("unknown method {} from {peer_addr}", message.typ.method);
        }
    }

    fn process_binding_request(
        &self,
        conn: &Arc<dyn Connection>,
        peer_addr: SocketAddr,
        request: &Message,
    ) {
        let Some((local_ufrag, remote_ufrag)) = get_ufrags(request) else {
            debug!("binding request from {peer_addr} without usable USERNAME");
            return;
        };

        trace!("client {peer_addr} sent binding request {local_ufrag}:{remote_ufrag}");

        let session = {
            let user_sessions = self.user_sessions.lock().unwrap();
            user_sessions.get(&local_ufrag).cloned()
        };
        let Some(session) = session else {
            // Normal race: the first check can beat add_session.
            debug!("user not found: {local_ufrag} (add_session needed)");
            return;
        };

        if session.peer.ufrag != remote_ufrag {
            warn!(
                "mismatched ufrag: {remote_ufrag} (ufrag in peer SDP: {})",
                session.peer.ufrag
            );
            if self.config.strict_username_check {
                return;
            }
        }

        let integrity = MessageIntegrity::new_short_term_integrity(session.offer.pwd.clone());
        if let Err(err) = integrity.check(request) {
            warn!(
                "failed to check integrity for session {}: {err}",
                session.session_id
            );
            self.fail_session(&session);
            return;
        }

        session.update_binding_time();

        let promoted = {
            let mut inner = session.inner.lock().unwrap();
            if inner.state == IceConnectionState::New {
                // The first authenticated check pins the transport; later
                // checks from other addresses do not move it.
                inner.state = IceConnectionState::Checking;
                inner.remote = Some(Arc::clone(conn));
                inner.peer_addr = Some(peer_addr);
                true
            } else {
                false
            }
        };

        if promoted {
            {
                let mut index = self.peer_index.lock().unwrap();
                index.by_address.insert(peer_addr, Arc::clone(&session));
                index.by_session_id.insert(session.session_id, Arc::clone(&session));
            }
            self.notify_state_changed(&session, IceConnectionState::Checking);
        }

        self.send_binding_response(conn, peer_addr, request, &session);
        self.send_binding_request(conn, peer_addr, &session);
    }

    fn send_binding_response(
        &self,
        conn: &Arc<dyn Connection>,
        peer_addr: SocketAddr,
        request: &Message,
        session: &Arc<Session>,
    ) {
        let mut response = Message::new(BINDING_SUCCESS);
        response.transaction_id = request.transaction_id;

        let result = XorMappedAddress::from(peer_addr)
            .add_to(&mut response)
            .and_then(|_| response.marshal(Some(session.offer.pwd.as_bytes())));
        if let Err(err) = result {
            warn!("could not marshal binding response: {err}");
            return;
        }

        trace!("sending binding response to {peer_addr}");
        if !conn.send_to(peer_addr, &response.raw) {
            debug!("binding response to {peer_addr} was not sent");
        }
    }

    /// The server's own connectivity check, sent right after the response.
    /// The peer's answer completes the handshake.
    fn send_binding_request(
        &self,
        conn: &Arc<dyn Connection>,
        peer_addr: SocketAddr,
        session: &Arc<Session>,
    ) {
        let mut request = Message::new(BINDING_REQUEST);
        request.transaction_id = TransactionId::new();

        let username = format!("{}:{}", session.peer.ufrag, session.offer.ufrag);
        let result = Username::new(ATTR_USERNAME, username)
            .add_to(&mut request)
            .and_then(|_| AttrControlling(self.tie_breaker).add_to(&mut request))
            .and_then(|_| UseCandidateAttr::new().add_to(&mut request))
            .and_then(|_| PriorityAttr(HOST_CANDIDATE_PRIORITY).add_to(&mut request))
            .and_then(|_| request.marshal(Some(session.peer.pwd.as_bytes())));
        if let Err(err) = result {
            warn!("could not marshal binding request: {err}");
            return;
        }

        session.record_pending_transaction(request.transaction_id);

        trace!("sending binding request to {peer_addr}");
        if !conn.send_to(peer_addr, &request.raw) {
            debug!("binding request to {peer_addr} was not sent");
        }
    }

    fn process_binding_response(&self, peer_addr: SocketAddr, response: &Message) {
        let session = {
            let index = self.peer_index.lock().unwrap();
            index.by_address.get(&peer_addr).cloned()
        };

        let Some(session) = session else {
            // Only the address pinned by the first check is answered; checks
            // racing in from other candidates were never indexed.
            debug!("binding response from unknown address {peer_addr}");
            return;
        };

        let integrity = MessageIntegrity::new_short_term_integrity(session.offer.pwd.clone());
        if let Err(err) = integrity.check(response) {
            warn!(
                "failed to check integrity for session {}: {err}",
                session.session_id
            );
            return;
        }

        if !session.take_pending_transaction(&response.transaction_id) {
            warn!(
                "binding response from {peer_addr} with unexpected transaction id {}",
                response.transaction_id
            );
            return;
        }

        trace!("client {peer_addr} sent binding response");

        let connected = {
            let mut inner = session.inner.lock().unwrap();
            if inner.state != IceConnectionState::Connected {
                inner.state = IceConnectionState::Connected;
                true
            } else {
                false
            }
        };

        if connected {
            self.notify_state_changed(&session, IceConnectionState::Connected);
        }
    }

    /// Integrity failures are session-fatal: the peer cannot authenticate.
    fn fail_session(&self, session: &Arc<Session>) {
        {
            let mut user_sessions = self.user_sessions.lock().unwrap();
            user_sessions.remove(&session.offer.ufrag);

            let mut index = self.peer_index.lock().unwrap();
            if let Some(addr) = session.peer_addr() {
                index.by_address.remove(&addr);
            }
            index.by_session_id.remove(&session.session_id);
        }

        self.set_session_state(session, IceConnectionState::Failed);
    }

    // ------------------------------------------------------------------
    // Expiry
    // ------------------------------------------------------------------

    pub(crate) fn check_timed_out_sessions(&self, now: Instant) {
        let mut expired = vec![];
        {
            let mut user_sessions = self.user_sessions.lock().unwrap();
            user_sessions.retain(|_, session| {
                if session.is_expired(now) {
                    expired.push(Arc::clone(session));
                    false
                } else {
                    true
                }
            });
        }

        if expired.is_empty() {
            return;
        }

        {
            let mut index = self.peer_index.lock().unwrap();
            for session in &expired {
                index.by_session_id.remove(&session.session_id);
                if let Some(addr) = session.peer_addr() {
                    index.by_address.remove(&addr);
                }
            }
        }

        for session in expired {
            if session.state() == IceConnectionState::New {
                // Never produced a connectivity check; there is no peer to
                // report gone.
                debug!(
                    "expiring session {} before any binding request",
                    session.session_id
                );
                continue;
            }
            debug!("session {} expired", session.session_id);
            self.set_session_state(&session, IceConnectionState::Disconnected);
        }
    }

    fn set_session_state(&self, session: &Arc<Session>, state: IceConnectionState) {
        session.inner.lock().unwrap().state = state;
        self.notify_state_changed(session, state);
    }

    fn notify_state_changed(&self, session: &Arc<Session>, state: IceConnectionState) {
        let observers = self.observers.read().unwrap().clone();
        for observer in observers {
            observer.on_state_changed(session.session_id, state);
        }
    }
}

impl TransportObserver for IcePort {
    fn on_connected(&self, conn: Arc<dyn Connection>) {
        if conn.transport_protocol() != TransportProtocol::TCP {
            return;
        }

        // A TURN client connected over TCP; its stream gets a demultiplexer.
        let demultiplexer = Arc::new(Mutex::new(TcpDemultiplexer::with_max_frame_size(
            self.config.max_tcp_frame_size,
        )));
        self.demultiplexers
            .write()
            .unwrap()
            .insert(conn.id(), demultiplexer);
    }

    fn on_data_received(&self, conn: &Arc<dyn Connection>, peer_addr: SocketAddr, data: &[u8]) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }

        if conn.transport_protocol() == TransportProtocol::TCP {
            let demultiplexer = {
                let demultiplexers = self.demultiplexers.read().unwrap();
                demultiplexers.get(&conn.id()).cloned()
            };
            let Some(demultiplexer) = demultiplexer else {
                error!(
                    "TCP data from {peer_addr} but no demultiplexer for connection {}",
                    conn.id()
                );
                return;
            };

            // The facade serialises on_data_received per TCP connection; the
            // mutex only satisfies the borrow rules.
            let mut demultiplexer = demultiplexer.lock().unwrap();
            demultiplexer.extend_from_slice(data);
            loop {
                match demultiplexer.next_packet() {
                    Ok(Some(packet)) => {
                        self.process_packet(conn, peer_addr, packet.packet_type, &packet.data)
                    }
                    Ok(None) => break,
                    Err(err) => {
                        warn!("closing {peer_addr}: {err}");
                        conn.close();
                        break;
                    }
                }
            }
        } else {
            let packet_type = find_packet_type(data);
            self.process_packet(conn, peer_addr, packet_type, data);
        }
    }

    fn on_disconnected(&self, conn: &Arc<dyn Connection>, reason: DisconnectReason) {
        debug!("connection {} disconnected: {reason:?}", conn.id());
        self.demultiplexers.write().unwrap().remove(&conn.id());
    }
}

impl Drop for IcePort {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Display for IcePort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<IcePort: {} physical ports>",
            self.physical_ports.lock().unwrap().len()
        )
    }
}

/// Splits USERNAME `local_ufrag:remote_ufrag` into its halves.
fn get_ufrags(m: &Message) -> Option<(String, String)> {
    let username = TextAttribute::get_from(m, ATTR_USERNAME).ok()?;
    let (local, remote) = username.text.split_once(':')?;
    if local.is_empty() || remote.is_empty() {
        return None;
    }
    Some((local.to_owned(), remote.to_owned()))
}

fn wildcard_addr(addr: SocketAddr) -> SocketAddr {
    match addr.ip() {
        IpAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), addr.port()),
        IpAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), addr.port()),
    }
}
