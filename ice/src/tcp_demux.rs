use crate::chandata::CHANNEL_DATA_HEADER_SIZE;
use crate::packet::{find_packet_type, PacketType};
use bytes::BytesMut;
use shared::error::{Error, Result};
use stun::message::MESSAGE_HEADER_SIZE;

/// Default cap on one frame carved out of a TCP stream.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 64 * 1024;

/// A frame carved out of a TCP stream, pre-classified by its leading byte.
#[derive(Debug)]
pub struct DemuxedPacket {
    pub packet_type: PacketType,
    pub data: BytesMut,
}

/// TcpDemultiplexer separates the self-delimiting STUN and TURN ChannelData
/// messages of one TCP byte stream.
///
/// A STUN frame spans `20 + header length` bytes. A ChannelData frame spans
/// `4 + length` rounded up to the 32-bit boundary, because stream transports
/// pad it (RFC 5766 §11.5). Anything else on the stream is a framing error
/// and the connection carrying it must be closed.
#[derive(Debug)]
pub struct TcpDemultiplexer {
    buffer: BytesMut,
    max_frame_size: usize,
}

impl Default for TcpDemultiplexer {
    fn default() -> Self {
        Self::new()
    }
}

impl TcpDemultiplexer {
    pub fn new() -> Self {
        Self::with_max_frame_size(DEFAULT_MAX_FRAME_SIZE)
    }

    pub fn with_max_frame_size(max_frame_size: usize) -> Self {
        Self {
            buffer: BytesMut::new(),
            max_frame_size,
        }
    }

    /// Appends bytes read from the stream.
    pub fn extend_from_slice(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Yields the next complete frame, or `None` while the stream is short.
    pub fn next_packet(&mut self) -> Result<Option<DemuxedPacket>> {
        // Both framings keep their length in bytes 2..4.
        if self.buffer.len() < CHANNEL_DATA_HEADER_SIZE {
            return Ok(None);
        }

        let packet_type = find_packet_type(&self.buffer);
        let length = u16::from_be_bytes([self.buffer[2], self.buffer[3]]) as usize;

        let total = match packet_type {
            PacketType::Stun => MESSAGE_HEADER_SIZE + length,
            PacketType::TurnChannelData => {
                let unpadded = CHANNEL_DATA_HEADER_SIZE + length;
                (unpadded + 3) & !3
            }
            _ => return Err(Error::ErrUnknownStreamFraming),
        };

        if total > self.max_frame_size {
            return Err(Error::ErrPacketTooBig);
        }
        if self.buffer.len() < total {
            return Ok(None);
        }

        let data = self.buffer.split_to(total);
        Ok(Some(DemuxedPacket { packet_type, data }))
    }

    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chandata::ChannelData;
    use stun::message::{Message, TransactionId, BINDING_REQUEST};

    fn stun_frame() -> Vec<u8> {
        let mut m = Message::new(BINDING_REQUEST);
        m.transaction_id = TransactionId::new();
        m.marshal(Some(b"pwd")).unwrap();
        m.raw
    }

    fn channel_frame(payload: &[u8]) -> Vec<u8> {
        ChannelData {
            number: 0x4001,
            data: payload.to_vec(),
        }
        .encode(true)
    }

    #[test]
    fn test_demux_mixed_frames() -> Result<()> {
        let stun = stun_frame();
        let chan = channel_frame(b"0123456789");

        let mut demux = TcpDemultiplexer::new();
        demux.extend_from_slice(&stun);
        demux.extend_from_slice(&chan);

        let first = demux.next_packet()?.expect("stun frame buffered");
        assert_eq!(first.packet_type, PacketType::Stun);
        assert_eq!(&first.data[..], &stun[..]);

        let second = demux.next_packet()?.expect("channel frame buffered");
        assert_eq!(second.packet_type, PacketType::TurnChannelData);
        assert_eq!(&second.data[..], &chan[..]);

        assert!(demux.next_packet()?.is_none());
        assert!(demux.is_empty());
        Ok(())
    }

    #[test]
    fn test_demux_byte_at_a_time() -> Result<()> {
        let mut stream = stun_frame();
        stream.extend_from_slice(&channel_frame(b"abc"));
        stream.extend_from_slice(&stun_frame());

        let mut all_at_once = TcpDemultiplexer::new();
        all_at_once.extend_from_slice(&stream);
        let mut expected = vec![];
        while let Some(packet) = all_at_once.next_packet()? {
            expected.push(packet.data.to_vec());
        }
        assert_eq!(expected.len(), 3);

        let mut demux = TcpDemultiplexer::new();
        let mut got = vec![];
        for &byte in &stream {
            demux.extend_from_slice(&[byte]);
            while let Some(packet) = demux.next_packet()? {
                got.push(packet.data.to_vec());
            }
        }

        assert_eq!(got, expected);
        assert!(demux.is_empty());
        Ok(())
    }

    #[test]
    fn test_demux_rejects_oversized_frame() {
        // A ChannelData header announcing more than the cap.
        let mut demux = TcpDemultiplexer::with_max_frame_size(1024);
        demux.extend_from_slice(&[0x40, 0x00, 0x40, 0x00]);
        assert_eq!(demux.next_packet().unwrap_err(), Error::ErrPacketTooBig);
    }

    #[test]
    fn test_demux_rejects_foreign_stream() {
        // DTLS does not arrive raw on this stream.
        let mut demux = TcpDemultiplexer::new();
        demux.extend_from_slice(&[0x16, 0xfe, 0xfd, 0x00]);
        assert_eq!(
            demux.next_packet().unwrap_err(),
            Error::ErrUnknownStreamFraming
        );
    }

    #[test]
    fn test_demux_waits_for_full_header() -> Result<()> {
        let mut demux = TcpDemultiplexer::new();
        demux.extend_from_slice(&[0x40, 0x00, 0x00]);
        assert!(demux.next_packet()?.is_none());
        assert_eq!(demux.buffered_len(), 3);
        Ok(())
    }
}
