use shared::error::{Error, Result};
use stun::message::Message;

/// ICE-CONTROLLING attribute (RFC 8445 §16.1).
pub const ATTR_ICE_CONTROLLING: u16 = 0x802A;

/// AttrControlling carries the controlling agent's 64-bit tie-breaker.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct AttrControlling(pub u64);

impl AttrControlling {
    pub fn add_to(&self, m: &mut Message) -> Result<()> {
        m.add(ATTR_ICE_CONTROLLING, &self.0.to_be_bytes());
        Ok(())
    }

    pub fn get_from(m: &Message) -> Result<Self> {
        let value = m.get(ATTR_ICE_CONTROLLING)?;
        if value.len() != 8 {
            return Err(Error::ErrAttributeSizeInvalid);
        }
        let mut b = [0u8; 8];
        b.copy_from_slice(value);
        Ok(Self(u64::from_be_bytes(b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stun::message::BINDING_REQUEST;

    #[test]
    fn test_controlling_roundtrip() -> Result<()> {
        let mut m = Message::new(BINDING_REQUEST);
        AttrControlling(0x1CF51EB1B0CBE349).add_to(&mut m)?;
        assert_eq!(AttrControlling::get_from(&m)?.0, 0x1CF51EB1B0CBE349);
        Ok(())
    }
}
