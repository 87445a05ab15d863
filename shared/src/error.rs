#![allow(dead_code)]

use std::io;
use std::net::SocketAddr;
use std::string::FromUtf8Error;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    //STUN errors
    #[error("attribute not found")]
    ErrAttributeNotFound,
    #[error("unexpected EOF")]
    ErrUnexpectedEof,
    #[error("unexpected EOF: not enough bytes to read header")]
    ErrUnexpectedHeaderEof,
    #[error("invalid magic cookie")]
    ErrInvalidMagicCookie,
    #[error("attribute size is invalid")]
    ErrAttributeSizeInvalid,
    #[error("attribute size overflow")]
    ErrAttributeSizeOverflow,
    #[error("integrity check failed")]
    ErrIntegrityMismatch,
    #[error("fingerprint check failed")]
    ErrFingerprintMismatch,
    #[error("invalid length of IP value")]
    ErrBadIpLength,

    // TURN ChannelData errors
    #[error("channel number not in [0x4000, 0x7FFF]")]
    ErrInvalidChannelNumber,
    #[error("channelData length != len(Data)")]
    ErrBadChannelDataLength,
    #[error("too short buffer")]
    ErrShortBuffer,

    // TCP demultiplexer errors
    #[error("packet too big")]
    ErrPacketTooBig,
    #[error("stream is neither STUN nor ChannelData")]
    ErrUnknownStreamFraming,

    // ICE port errors
    #[error("duplicated ufrag")]
    ErrDuplicateUfrag,
    #[error("session not found")]
    ErrSessionNotFound,
    #[error("bind failed")]
    ErrBindFailed,
    #[error("already closed")]
    ErrAlreadyClosed,
    #[error("invalid remote address: {0}")]
    InvalidRemoteAddress(SocketAddr),

    #[error("parse: invalid utf-8: {0}")]
    Utf8(#[from] FromUtf8Error),
    #[error("io error: {0}")]
    Io(#[from] IoError),
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
#[error("io error: {0}")]
pub struct IoError(#[from] pub io::Error);

// Workaround for wanting PartialEq for io::Error.
impl PartialEq for IoError {
    fn eq(&self, other: &Self) -> bool {
        self.0.kind() == other.0.kind()
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(IoError(e))
    }
}
