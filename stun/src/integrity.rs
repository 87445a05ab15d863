use crate::attributes::ATTR_MESSAGE_INTEGRITY;
use crate::message::{Message, ATTRIBUTE_HEADER_SIZE, MESSAGE_HEADER_SIZE};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use shared::error::{Error, Result};

type HmacSha1 = Hmac<Sha1>;

/// Size of the MESSAGE-INTEGRITY value (HMAC-SHA1 output).
pub const MESSAGE_INTEGRITY_SIZE: usize = 20;

/// MessageIntegrity holds the HMAC-SHA1 key for the MESSAGE-INTEGRITY
/// attribute (RFC 5389 §15.4).
///
/// The MAC covers the message from its start through the byte preceding the
/// attribute, with the header length field rewritten to include the attribute
/// itself and exclude anything appended after it (i.e. FINGERPRINT).
#[derive(Debug, Clone)]
pub struct MessageIntegrity(pub Vec<u8>);

impl MessageIntegrity {
    /// Short-term credential mode: the key is the raw password, no SASLprep.
    pub fn new_short_term_integrity(password: String) -> Self {
        Self(password.into_bytes())
    }

    /// Appends MESSAGE-INTEGRITY to a message being marshalled.
    pub fn add_to(&self, m: &mut Message) -> Result<()> {
        let length =
            m.raw.len() - MESSAGE_HEADER_SIZE + ATTRIBUTE_HEADER_SIZE + MESSAGE_INTEGRITY_SIZE;
        m.set_raw_length(length as u16);

        let digest = hmac_sha1(&self.0, &m.raw)?;
        m.append_raw_attribute(ATTR_MESSAGE_INTEGRITY, &digest);
        Ok(())
    }

    /// Verifies MESSAGE-INTEGRITY of a parsed message.
    pub fn check(&self, m: &Message) -> Result<()> {
        let offset = m
            .raw_attribute_offset(ATTR_MESSAGE_INTEGRITY)
            .ok_or(Error::ErrAttributeNotFound)?;
        let expected = m.get(ATTR_MESSAGE_INTEGRITY)?;
        if expected.len() != MESSAGE_INTEGRITY_SIZE {
            return Err(Error::ErrAttributeSizeInvalid);
        }

        let mut input = m.raw[..offset].to_vec();
        let length = offset - MESSAGE_HEADER_SIZE + ATTRIBUTE_HEADER_SIZE + MESSAGE_INTEGRITY_SIZE;
        input[2..4].copy_from_slice(&(length as u16).to_be_bytes());

        let digest = hmac_sha1(&self.0, &input)?;
        if digest == expected {
            Ok(())
        } else {
            Err(Error::ErrIntegrityMismatch)
        }
    }
}

fn hmac_sha1(key: &[u8], input: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha1::new_from_slice(key).map_err(|e| Error::Other(e.to_string()))?;
    mac.update(input);
    Ok(mac.finalize().into_bytes().to_vec())
}
