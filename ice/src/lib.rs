#![warn(rust_2018_idioms)]
#![allow(dead_code)]

pub mod attributes;
pub mod candidate;
pub mod chandata;
pub mod observer;
pub mod packet;
pub mod port;
pub mod session;
pub mod state;
pub mod tcp_demux;

pub use candidate::IceCandidate;
pub use observer::IcePortObserver;
pub use port::port_config::IcePortConfig;
pub use port::IcePort;
pub use session::{IceCredentials, SessionId};
pub use state::IceConnectionState;
