//! Chat payload classification and construction
//!
//! A chat frame is an ordinary Ethernet frame whose payload starts with the
//! ASCII marker `"CHAT "`; the rest of the payload is the message text
//! verbatim. There is no length prefix, no sequencing and no versioning.

use std::fmt;

use bytes::BytesMut;

use crate::frame::{EthernetFrame, ETHERNET_MTU};
use crate::wire::MacAddr;
use crate::{ChatError, Result};

/// Marker identifying a chat payload, including the trailing space
pub const CHAT_MARKER: &[u8] = b"CHAT ";

/// Ethertype stamped on outgoing chat frames
///
/// 0x88B5 is reserved for local experiments, which keeps chat traffic
/// distinguishable from IP and ARP. Inbound classification matches on the
/// payload marker alone, not on this value.
pub const CHAT_ETHER_TYPE: u16 = 0x88b5;

/// Longest message text that still fits in a single frame
pub const MAX_TEXT_LEN: usize = ETHERNET_MTU - CHAT_MARKER.len();

/// A chat message extracted from a captured frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Hardware address of the sending station
    pub sender: MacAddr,
    /// Message text, marker stripped
    pub text: String,
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.sender, self.text)
    }
}

/// Outcome of classifying one captured frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A chat frame from another station
    Accepted(ChatMessage),
    /// Anything else; the reason says why the frame was not accepted
    Rejected(RejectReason),
}

/// Why a captured frame is not a displayable chat message
///
/// Rejection is the expected majority outcome on a busy link, so it is an
/// inspectable value rather than an error. The caller decides whether to
/// log or ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Too short or malformed to contain an Ethernet header
    NoLinkHeader,
    /// Valid header, but the payload does not start with the marker
    NotChatProtocol,
    /// A chat frame this station broadcast itself
    SelfOriginated,
}

/// Classify a raw captured frame against the local identity.
///
/// Checks run in fixed order: header validity, protocol marker,
/// self-origin. The marker is stripped only after all checks pass; the
/// remaining payload bytes are the message text, decoded as UTF-8 with
/// invalid sequences replaced.
pub fn classify(raw: &[u8], local: MacAddr) -> Classification {
    let mut buf = raw;
    let frame = match EthernetFrame::parse(&mut buf) {
        Ok(frame) => frame,
        Err(_) => return Classification::Rejected(RejectReason::NoLinkHeader),
    };

    if !frame.payload.starts_with(CHAT_MARKER) {
        return Classification::Rejected(RejectReason::NotChatProtocol);
    }

    if frame.src == local {
        return Classification::Rejected(RejectReason::SelfOriginated);
    }

    let text = String::from_utf8_lossy(&frame.payload[CHAT_MARKER.len()..]).into_owned();
    Classification::Accepted(ChatMessage {
        sender: frame.src,
        text,
    })
}

/// Build a broadcast chat frame for one line of local text.
///
/// The text must already have its trailing newline stripped. Text that does
/// not fit in a single frame is refused outright; nothing is truncated.
pub fn build_frame(text: &str, local: MacAddr) -> Result<Vec<u8>> {
    let payload_len = CHAT_MARKER.len() + text.len();
    if payload_len > ETHERNET_MTU {
        return Err(ChatError::PayloadTooLarge {
            size: payload_len,
            max: ETHERNET_MTU,
        });
    }

    let mut payload = BytesMut::with_capacity(payload_len);
    payload.extend_from_slice(CHAT_MARKER);
    payload.extend_from_slice(text.as_bytes());

    let frame = EthernetFrame::new(MacAddr::BROADCAST, local, CHAT_ETHER_TYPE, payload.freeze());

    let mut out = BytesMut::with_capacity(frame.size());
    frame.serialize(&mut out)?;
    Ok(out.to_vec())
}
