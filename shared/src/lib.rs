#![warn(rust_2018_idioms)]
#![allow(dead_code)]

pub mod error;
pub mod transport;
pub mod util;

pub use transport::{
    Connection, ConnectionId, DisconnectReason, Transport, TransportObserver, TransportProtocol,
};
