use crate::message::Message;
use shared::error::{Error, Result};
use std::fmt;

/// USERNAME attribute (RFC 5389 §15.3).
pub const ATTR_USERNAME: u16 = 0x0006;
/// MESSAGE-INTEGRITY attribute (RFC 5389 §15.4).
pub const ATTR_MESSAGE_INTEGRITY: u16 = 0x0008;
/// XOR-MAPPED-ADDRESS attribute (RFC 5389 §15.2).
pub const ATTR_XOR_MAPPED_ADDRESS: u16 = 0x0020;
/// FINGERPRINT attribute (RFC 5389 §15.5).
pub const ATTR_FINGERPRINT: u16 = 0x8028;

/// Rounds an attribute value length up to the 32-bit boundary.
pub fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

/// RawAttribute is a type-length-value attribute as it appears on the wire,
/// with padding stripped from the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute {
    pub typ: u16,
    pub value: Vec<u8>,
}

impl RawAttribute {
    pub fn length(&self) -> u16 {
        self.value.len() as u16
    }
}

impl fmt::Display for RawAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attr 0x{:04x} ({} bytes)", self.typ, self.value.len())
    }
}

/// TextAttribute is an attribute carrying a plain UTF-8 value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAttribute {
    pub attr: u16,
    pub text: String,
}

/// Username represents the USERNAME attribute.
pub type Username = TextAttribute;

impl TextAttribute {
    pub fn new(attr: u16, text: String) -> Self {
        Self { attr, text }
    }

    pub fn add_to(&self, m: &mut Message) -> Result<()> {
        m.add(self.attr, self.text.as_bytes());
        Ok(())
    }

    pub fn get_from(m: &Message, attr: u16) -> Result<Self> {
        let value = m.get(attr)?;
        Ok(Self {
            attr,
            text: String::from_utf8(value.to_vec()).map_err(Error::Utf8)?,
        })
    }
}

impl fmt::Display for TextAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Message, BINDING_REQUEST};

    #[test]
    fn test_padded_len() {
        assert_eq!(padded_len(0), 0);
        assert_eq!(padded_len(1), 4);
        assert_eq!(padded_len(4), 4);
        assert_eq!(padded_len(5), 8);
        assert_eq!(padded_len(20), 20);
    }

    #[test]
    fn test_text_attribute_roundtrip() -> Result<()> {
        let mut m = Message::new(BINDING_REQUEST);
        Username::new(ATTR_USERNAME, "AAAAAA:BBBBBB".to_owned()).add_to(&mut m)?;

        let got = TextAttribute::get_from(&m, ATTR_USERNAME)?;
        assert_eq!(got.text, "AAAAAA:BBBBBB");
        Ok(())
    }

    #[test]
    fn test_text_attribute_missing() {
        let m = Message::new(BINDING_REQUEST);
        assert_eq!(
            TextAttribute::get_from(&m, ATTR_USERNAME),
            Err(Error::ErrAttributeNotFound)
        );
    }
}
