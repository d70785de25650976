//! Ethernet frame structures and parsing
//!
//! This module contains the data structures and parsing logic for raw
//! Ethernet frames: a fixed 14-byte header (destination, source, ethertype)
//! followed by the payload.

use bytes::{Buf, BufMut, Bytes};

use crate::wire::{MacAddr, MAC_ADDR_LEN};
use crate::{ChatError, Result};

/// Length of the fixed Ethernet header
pub const ETHERNET_HEADER_LEN: usize = 2 * MAC_ADDR_LEN + 2;

/// Maximum payload carried by a single frame (the classic Ethernet MTU)
pub const ETHERNET_MTU: usize = 1500;

/// A raw Ethernet frame decomposed into its header fields and payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetFrame {
    pub dst: MacAddr,
    pub src: MacAddr,
    pub ether_type: u16,
    pub payload: Bytes,
}

impl EthernetFrame {
    /// Create a new frame
    pub fn new(dst: MacAddr, src: MacAddr, ether_type: u16, payload: Bytes) -> Self {
        Self {
            dst,
            src,
            ether_type,
            payload,
        }
    }

    /// Parse a frame from a buffer
    ///
    /// Header fields are fixed-width and positional; anything shorter than
    /// the header is rejected. The rest of the buffer is the payload.
    pub fn parse(buf: &mut impl Buf) -> Result<Self> {
        if buf.remaining() < ETHERNET_HEADER_LEN {
            return Err(ChatError::Parse(
                "insufficient data for Ethernet header".to_string(),
            ));
        }

        let mut dst = [0u8; MAC_ADDR_LEN];
        let mut src = [0u8; MAC_ADDR_LEN];

        buf.copy_to_slice(&mut dst);
        buf.copy_to_slice(&mut src);
        let ether_type = buf.get_u16();

        let payload_len = buf.remaining();
        let mut payload_bytes = vec![0u8; payload_len];
        buf.copy_to_slice(&mut payload_bytes);
        let payload = Bytes::from(payload_bytes);

        Ok(Self {
            dst: MacAddr::new(dst),
            src: MacAddr::new(src),
            ether_type,
            payload,
        })
    }

    /// Serialize the frame to a buffer
    pub fn serialize(&self, buf: &mut impl BufMut) -> Result<()> {
        buf.put_slice(&self.dst.octets());
        buf.put_slice(&self.src.octets());
        buf.put_u16(self.ether_type);
        buf.put_slice(&self.payload);
        Ok(())
    }

    /// Get the total size of the frame when serialized
    pub fn size(&self) -> usize {
        ETHERNET_HEADER_LEN + self.payload.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn test_parse_valid_frame() {
        let mut raw = Vec::new();
        raw.extend_from_slice(&[0xff; 6]);
        raw.extend_from_slice(&[1, 2, 3, 4, 5, 6]);
        raw.extend_from_slice(&0x88b5u16.to_be_bytes());
        raw.extend_from_slice(b"payload");

        let frame = EthernetFrame::parse(&mut raw.as_slice()).unwrap();
        assert_eq!(frame.dst, MacAddr::BROADCAST);
        assert_eq!(frame.src, MacAddr::new([1, 2, 3, 4, 5, 6]));
        assert_eq!(frame.ether_type, 0x88b5);
        assert_eq!(&frame.payload[..], b"payload");
    }

    #[test]
    fn test_parse_rejects_short_frame() {
        let raw = [0u8; ETHERNET_HEADER_LEN - 1];
        assert!(EthernetFrame::parse(&mut raw.as_slice()).is_err());
    }

    #[test]
    fn test_parse_accepts_empty_payload() {
        let raw = [0u8; ETHERNET_HEADER_LEN];
        let frame = EthernetFrame::parse(&mut raw.as_slice()).unwrap();
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn test_serialize_parse_round_trip() {
        let frame = EthernetFrame::new(
            MacAddr::BROADCAST,
            MacAddr::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]),
            0x88b5,
            Bytes::from_static(b"CHAT hello"),
        );

        let mut buf = BytesMut::with_capacity(frame.size());
        frame.serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), frame.size());

        let parsed = EthernetFrame::parse(&mut buf.freeze()).unwrap();
        assert_eq!(parsed, frame);
    }

    #[test]
    fn test_size_counts_header_and_payload() {
        let frame = EthernetFrame::new(
            MacAddr::BROADCAST,
            MacAddr::new([1, 2, 3, 4, 5, 6]),
            0x88b5,
            Bytes::from_static(b"abc"),
        );
        assert_eq!(frame.size(), ETHERNET_HEADER_LEN + 3);
    }
}
