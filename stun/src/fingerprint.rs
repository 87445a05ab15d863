use crate::attributes::ATTR_FINGERPRINT;
use crate::message::{Message, ATTRIBUTE_HEADER_SIZE, MESSAGE_HEADER_SIZE};
use crc::{Crc, CRC_32_ISO_HDLC};
use shared::error::{Error, Result};

/// FINGERPRINT is XORed with the CRC to distinguish STUN from protocols
/// that also use CRC-32 (RFC 5389 §15.5).
pub const FINGERPRINT_XOR_VALUE: u32 = 0x5354554e;
/// Size of the FINGERPRINT value.
pub const FINGERPRINT_SIZE: usize = 4;

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// FingerprintAttr computes and validates the FINGERPRINT attribute. It must
/// be the last attribute of a message.
pub struct FingerprintAttr;

/// FINGERPRINT is the shared instance, mirroring its attribute name.
pub const FINGERPRINT: FingerprintAttr = FingerprintAttr;

/// CRC-32 of `input`, XORed per RFC 5389 §15.5.
pub fn fingerprint_value(input: &[u8]) -> u32 {
    CRC32.checksum(input) ^ FINGERPRINT_XOR_VALUE
}

impl FingerprintAttr {
    /// Appends FINGERPRINT to a message being marshalled.
    pub fn add_to(&self, m: &mut Message) -> Result<()> {
        let length = m.raw.len() - MESSAGE_HEADER_SIZE + ATTRIBUTE_HEADER_SIZE + FINGERPRINT_SIZE;
        m.set_raw_length(length as u16);

        let value = fingerprint_value(&m.raw);
        m.append_raw_attribute(ATTR_FINGERPRINT, &value.to_be_bytes());
        Ok(())
    }

    /// Verifies the FINGERPRINT of a parsed message.
    pub fn check(&self, m: &Message) -> Result<()> {
        let offset = m
            .raw_attribute_offset(ATTR_FINGERPRINT)
            .ok_or(Error::ErrAttributeNotFound)?;
        let expected = m.get(ATTR_FINGERPRINT)?;
        if expected.len() != FINGERPRINT_SIZE {
            return Err(Error::ErrAttributeSizeInvalid);
        }
        let expected = u32::from_be_bytes([expected[0], expected[1], expected[2], expected[3]]);

        let mut input = m.raw[..offset].to_vec();
        let length = offset - MESSAGE_HEADER_SIZE + ATTRIBUTE_HEADER_SIZE + FINGERPRINT_SIZE;
        input[2..4].copy_from_slice(&(length as u16).to_be_bytes());

        if fingerprint_value(&input) == expected {
            Ok(())
        } else {
            Err(Error::ErrFingerprintMismatch)
        }
    }
}
