
use crate::attributes::{padded_len, RawAttribute, ATTR_FINGERPRINT, ATTR_MESSAGE_INTEGRITY};
use crate::fingerprint::FINGERPRINT;
use crate::integrity::MessageIntegrity;
use rand::{rng, Rng};
use shared::error::{Error, Result};
use std::fmt;

/// Magic cookie of RFC 5389, fixed at offset 4 of every message.
pub const MAGIC_COOKIE: u32 = 0x2112A442;
/// Size of the fixed message header.
pub const MESSAGE_HEADER_SIZE: usize = 20;
/// Size of one attribute header (type + length).
pub const ATTRIBUTE_HEADER_SIZE: usize = 4;
/// Size of the transaction id.
pub const TRANSACTION_ID_SIZE: usize = 12;

/// TransactionId is a 12-byte client-chosen message identifier.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TransactionId(pub [u8; TRANSACTION_ID_SIZE]);

impl TransactionId {
    /// Returns a cryptographically-random transaction id.
    pub fn new() -> Self {
        let mut b = [0u8; TRANSACTION_ID_SIZE];
        rng().fill(&mut b[..]);
        Self(b)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// MessageClass is the class bits of RFC 5389 §6.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MessageClass {
    Request = 0b00,
    Indication = 0b01,
    SuccessResponse = 0b10,
    ErrorResponse = 0b11,
}

impl fmt::Display for MessageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Self::Request => "request",
            Self::Indication => "indication",
            Self::SuccessResponse => "success response",
            Self::ErrorResponse => "error response",
        };
        write!(f, "{s}")
    }
}

/// Method is the 12-bit STUN method.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Method(pub u16);

pub const METHOD_BINDING: Method = Method(0x001);
pub const METHOD_ALLOCATE: Method = Method(0x003);

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            METHOD_BINDING => write!(f, "Binding"),
            METHOD_ALLOCATE => write!(f, "Allocate"),
            Method(other) => write!(f, "0x{other:03x}"),
        }
    }
}

/// MessageType is the class and method packed into the leading 14 bits of the
/// header per RFC 5389 §6: M11..M7 | C1 | M6..M4 | C0 | M3..M0.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MessageType {
    pub method: Method,
    pub class: MessageClass,
}

pub const BINDING_REQUEST: MessageType = MessageType {
    method: METHOD_BINDING,
    class: MessageClass::Request,
};
pub const BINDING_SUCCESS: MessageType = MessageType {
    method: METHOD_BINDING,
    class: MessageClass::SuccessResponse,
};
pub const BINDING_ERROR: MessageType = MessageType {
    method: METHOD_BINDING,
    class: MessageClass::ErrorResponse,
};

// Method bit groups around the interleaved class bits.
const METHOD_A_BITS: u16 = 0x000f; // M3..M0
const METHOD_B_BITS: u16 = 0x0070; // M6..M4
const METHOD_D_BITS: u16 = 0x0f80; // M11..M7

const CLASS_C0_SHIFT: u16 = 4;
const CLASS_C1_SHIFT: u16 = 7;

impl MessageType {
    pub fn new(method: Method, class: MessageClass) -> Self {
        Self { method, class }
    }

    /// Encodes into the wire u16.
    pub fn value(&self) -> u16 {
        let m = self.method.0;
        let a = m & METHOD_A_BITS;
        let b = (m & METHOD_B_BITS) << 1;
        let d = (m & METHOD_D_BITS) << 2;

        let c = self.class as u16;
        let c0 = (c & 0b01) << CLASS_C0_SHIFT;
        let c1 = (c & 0b10) << CLASS_C1_SHIFT;

        a | b | d | c0 | c1
    }

    /// Decodes from the wire u16.
    pub fn from_value(v: u16) -> Self {
        let c = ((v >> CLASS_C0_SHIFT) & 0b01) | ((v >> CLASS_C1_SHIFT) & 0b10);
        let class = match c {
            0b00 => MessageClass::Request,
            0b01 => MessageClass::Indication,
            0b10 => MessageClass::SuccessResponse,
            _ => MessageClass::ErrorResponse,
        };

        let method = (v & METHOD_A_BITS) | ((v >> 1) & METHOD_B_BITS) | ((v >> 2) & METHOD_D_BITS);

        Self {
            method: Method(method),
            class,
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.class)
    }
}

/// Message is a parsed or under-construction STUN message.
///
/// `raw` holds the wire representation: populated by [`Message::unmarshal`]
/// for inbound messages and by [`Message::marshal`] for outbound ones. The
/// integrity and fingerprint checks operate on `raw`.
#[derive(Debug, Clone)]
pub struct Message {
    pub typ: MessageType,
    pub transaction_id: TransactionId,
    pub attributes: Vec<RawAttribute>,
    pub raw: Vec<u8>,
}

impl Message {
    pub fn new(typ: MessageType) -> Self {
        Self {
            typ,
            transaction_id: TransactionId::default(),
            attributes: vec![],
            raw: vec![],
        }
    }

    /// Appends a user attribute. Marshalling writes attributes in insertion
    /// order.
    pub fn add(&mut self, typ: u16, value: &[u8]) {
        self.attributes.push(RawAttribute {
            typ,
            value: value.to_vec(),
        });
    }

    /// Returns the value of the first attribute of the given type.
    pub fn get(&self, typ: u16) -> Result<&[u8]> {
        self.attributes
            .iter()
            .find(|a| a.typ == typ)
            .map(|a| a.value.as_slice())
            .ok_or(Error::ErrAttributeNotFound)
    }

    pub fn contains(&self, typ: u16) -> bool {
        self.attributes.iter().any(|a| a.typ == typ)
    }

    /// Serialises the header and all user attributes into `raw`, then appends
    /// MESSAGE-INTEGRITY keyed by `key` followed by FINGERPRINT when a key is
    /// given. The header length field is updated per append.
    pub fn marshal(&mut self, key: Option<&[u8]>) -> Result<()> {
        if key.is_some() {
            // Recomputed below; stale copies from an earlier marshal or an
            // unmarshal must not be serialised twice.
            self.attributes
                .retain(|a| a.typ != ATTR_MESSAGE_INTEGRITY && a.typ != ATTR_FINGERPRINT);
        }
        self.encode();
        if let Some(key) = key {
            MessageIntegrity(key.to_vec()).add_to(self)?;
            FINGERPRINT.add_to(self)?;
        }
        Ok(())
    }

    fn encode(&mut self) {
        self.raw.clear();
        self.raw
            .extend_from_slice(&self.typ.value().to_be_bytes());
        self.raw.extend_from_slice(&0u16.to_be_bytes());
        self.raw.extend_from_slice(&MAGIC_COOKIE.to_be_bytes());
        self.raw.extend_from_slice(&self.transaction_id.0);

        let attributes = std::mem::take(&mut self.attributes);
        for a in &attributes {
            self.raw.extend_from_slice(&a.typ.to_be_bytes());
            self.raw
                .extend_from_slice(&(a.value.len() as u16).to_be_bytes());
            self.raw.extend_from_slice(&a.value);
            for _ in a.value.len()..padded_len(a.value.len()) {
                self.raw.push(0);
            }
        }
        self.attributes = attributes;

        let length = (self.raw.len() - MESSAGE_HEADER_SIZE) as u16;
        self.set_raw_length(length);
    }

    /// Appends one attribute directly to `raw` (and the attribute list),
    /// refreshing the header length. Used by the integrity and fingerprint
    /// setters which must observe the bytes serialised so far.
    pub(crate) fn append_raw_attribute(&mut self, typ: u16, value: &[u8]) {
        self.attributes.push(RawAttribute {
            typ,
            value: value.to_vec(),
        });
        self.raw.extend_from_slice(&typ.to_be_bytes());
        self.raw
            .extend_from_slice(&(value.len() as u16).to_be_bytes());
        self.raw.extend_from_slice(value);
        for _ in value.len()..padded_len(value.len()) {
            self.raw.push(0);
        }
        let length = (self.raw.len() - MESSAGE_HEADER_SIZE) as u16;
        self.set_raw_length(length);
    }

    pub(crate) fn set_raw_length(&mut self, length: u16) {
        self.raw[2..4].copy_from_slice(&length.to_be_bytes());
    }

    /// Byte offset of the first attribute of the given type within `raw`.
    pub(crate) fn raw_attribute_offset(&self, typ: u16) -> Option<usize> {
        let mut pos = MESSAGE_HEADER_SIZE;
        while pos + ATTRIBUTE_HEADER_SIZE <= self.raw.len() {
            let t = u16::from_be_bytes([self.raw[pos], self.raw[pos + 1]]);
            let len = u16::from_be_bytes([self.raw[pos + 2], self.raw[pos + 3]]) as usize;
            if t == typ {
                return Some(pos);
            }
            pos += ATTRIBUTE_HEADER_SIZE + padded_len(len);
        }
        None
    }

    /// Parses a wire message. Attribute values are stored unpadded; the exact
    /// input bytes are kept in `raw` for later integrity verification.
    pub fn unmarshal(buf: &[u8]) -> Result<Message> {
        if buf.len() < MESSAGE_HEADER_SIZE {
            return Err(Error::ErrUnexpectedHeaderEof);
        }

        let typ = MessageType::from_value(u16::from_be_bytes([buf[0], buf[1]]));
        let length = u16::from_be_bytes([buf[2], buf[3]]) as usize;
        let cookie = u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]);

        if cookie != MAGIC_COOKIE {
            return Err(Error::ErrInvalidMagicCookie);
        }
        if length % 4 != 0 {
            return Err(Error::ErrAttributeSizeInvalid);
        }
        if buf.len() < MESSAGE_HEADER_SIZE + length {
            return Err(Error::ErrUnexpectedEof);
        }

        let mut transaction_id = TransactionId::default();
        transaction_id
            .0
            .copy_from_slice(&buf[8..MESSAGE_HEADER_SIZE]);

        let end = MESSAGE_HEADER_SIZE + length;
        let mut attributes = vec![];
        let mut pos = MESSAGE_HEADER_SIZE;
        while pos < end {
            if pos + ATTRIBUTE_HEADER_SIZE > end {
                return Err(Error::ErrAttributeSizeInvalid);
            }
            let typ = u16::from_be_bytes([buf[pos], buf[pos + 1]]);
            let len = u16::from_be_bytes([buf[pos + 2], buf[pos + 3]]) as usize;
            let value_start = pos + ATTRIBUTE_HEADER_SIZE;
            if value_start + padded_len(len) > end {
                return Err(Error::ErrAttributeSizeOverflow);
            }
            attributes.push(RawAttribute {
                typ,
                value: buf[value_start..value_start + len].to_vec(),
            });
            pos = value_start + padded_len(len);
        }

        Ok(Message {
            typ,
            transaction_id,
            attributes,
            raw: buf[..end].to_vec(),
        })
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} attrs, tid {})",
            self.typ,
            self.attributes.len(),
            self.transaction_id
        )
    }
}
