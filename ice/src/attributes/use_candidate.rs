use shared::error::Result;
use stun::message::Message;

/// USE-CANDIDATE attribute (RFC 8445 §16.1).
pub const ATTR_USE_CANDIDATE: u16 = 0x0025;

/// UseCandidateAttr nominates the pair carrying the check. Value-less.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct UseCandidateAttr;

impl UseCandidateAttr {
    pub fn new() -> Self {
        Self
    }

    pub fn add_to(&self, m: &mut Message) -> Result<()> {
        m.add(ATTR_USE_CANDIDATE, &[]);
        Ok(())
    }

    pub fn is_set(m: &Message) -> bool {
        m.contains(ATTR_USE_CANDIDATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stun::message::BINDING_REQUEST;

    #[test]
    fn test_use_candidate() -> Result<()> {
        let mut m = Message::new(BINDING_REQUEST);
        assert!(!UseCandidateAttr::is_set(&m));
        UseCandidateAttr::new().add_to(&mut m)?;
        assert!(UseCandidateAttr::is_set(&m));
        Ok(())
    }
}
