use shared::error::{Error, Result};

/// Bounds of the TURN channel number space (RFC 5766 §11).
pub const MIN_CHANNEL_NUMBER: u16 = 0x4000;
pub const MAX_CHANNEL_NUMBER: u16 = 0x7FFF;

/// Size of the ChannelData header: channel number plus length.
pub const CHANNEL_DATA_HEADER_SIZE: usize = 4;

/// ChannelData is the compact framing that carries relayed payloads over a
/// TURN allocation (RFC 5766 §11).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelData {
    pub number: u16,
    pub data: Vec<u8>,
}

impl ChannelData {
    /// Decapsulates one ChannelData message. Trailing stream padding past the
    /// declared length is ignored.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < CHANNEL_DATA_HEADER_SIZE {
            return Err(Error::ErrShortBuffer);
        }

        let number = u16::from_be_bytes([buf[0], buf[1]]);
        if !(MIN_CHANNEL_NUMBER..=MAX_CHANNEL_NUMBER).contains(&number) {
            return Err(Error::ErrInvalidChannelNumber);
        }

        let length = u16::from_be_bytes([buf[2], buf[3]]) as usize;
        if CHANNEL_DATA_HEADER_SIZE + length > buf.len() {
            return Err(Error::ErrBadChannelDataLength);
        }

        Ok(Self {
            number,
            data: buf[CHANNEL_DATA_HEADER_SIZE..CHANNEL_DATA_HEADER_SIZE + length].to_vec(),
        })
    }

    /// Encodes the message. Padding to the 32-bit boundary applies over
    /// stream transports only (RFC 5766 §11.5), so it is opt-in.
    pub fn encode(&self, pad: bool) -> Vec<u8> {
        let mut out = Vec::with_capacity(CHANNEL_DATA_HEADER_SIZE + self.data.len() + 3);
        out.extend_from_slice(&self.number.to_be_bytes());
        out.extend_from_slice(&(self.data.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.data);
        if pad {
            while out.len() % 4 != 0 {
                out.push(0);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_roundtrip() -> Result<()> {
        let message = ChannelData {
            number: 0x4001,
            data: b"relayed payload".to_vec(),
        };

        let decoded = ChannelData::decode(&message.encode(false))?;
        assert_eq!(decoded, message);

        // Stream padding must not leak into the payload.
        let padded = message.encode(true);
        assert_eq!(padded.len() % 4, 0);
        let decoded = ChannelData::decode(&padded)?;
        assert_eq!(decoded, message);
        Ok(())
    }

    #[test]
    fn test_decode_rejects_bad_channel_number() {
        // 0x3FFF is below the channel space; 0x80 leads the RTP range.
        for buf in [[0x3f, 0xff, 0, 0], [0x80, 0x00, 0, 0]] {
            assert_eq!(
                ChannelData::decode(&buf).unwrap_err(),
                Error::ErrInvalidChannelNumber
            );
        }
    }

    #[test]
    fn test_decode_rejects_short_buffer() {
        assert_eq!(
            ChannelData::decode(&[0x40, 0x00]).unwrap_err(),
            Error::ErrShortBuffer
        );
    }

    #[test]
    fn test_decode_rejects_truncated_payload() {
        // Declares 8 bytes of payload but carries 2.
        let buf = [0x40, 0x00, 0x00, 0x08, 0xAA, 0xBB];
        assert_eq!(
            ChannelData::decode(&buf).unwrap_err(),
            Error::ErrBadChannelDataLength
        );
    }
}
