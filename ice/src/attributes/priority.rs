use shared::error::{Error, Result};
use stun::message::Message;

/// PRIORITY attribute (RFC 8445 §16.1).
pub const ATTR_PRIORITY: u16 = 0x0024;

/// PriorityAttr advertises the sender's candidate priority for the check.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct PriorityAttr(pub u32);

impl PriorityAttr {
    pub fn add_to(&self, m: &mut Message) -> Result<()> {
        m.add(ATTR_PRIORITY, &self.0.to_be_bytes());
        Ok(())
    }

    pub fn get_from(m: &Message) -> Result<Self> {
        let value = m.get(ATTR_PRIORITY)?;
        if value.len() != 4 {
            return Err(Error::ErrAttributeSizeInvalid);
        }
        Ok(Self(u32::from_be_bytes([
            value[0], value[1], value[2], value[3],
        ])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stun::message::BINDING_REQUEST;

    #[test]
    fn test_priority_roundtrip() -> Result<()> {
        let mut m = Message::new(BINDING_REQUEST);
        PriorityAttr(0x6E7F1EFF).add_to(&mut m)?;
        assert_eq!(PriorityAttr::get_from(&m)?.0, 0x6E7F1EFF);
        Ok(())
    }
}
