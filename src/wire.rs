//! Wire-level types
//!
//! Hardware addresses as they appear in the Ethernet header. Addresses are
//! fixed-width, compared byte-wise and displayed as colon-separated
//! lowercase hex octets.

use std::fmt;
use std::str::FromStr;

use crate::{ChatError, Result};

/// Length of a hardware address in bytes
pub const MAC_ADDR_LEN: usize = 6;

/// A 6-byte IEEE 802 hardware address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr([u8; MAC_ADDR_LEN]);

impl MacAddr {
    /// The all-ones broadcast address, accepted by every station on the segment
    pub const BROADCAST: MacAddr = MacAddr([0xff; MAC_ADDR_LEN]);

    /// Create an address from raw octets
    pub const fn new(octets: [u8; MAC_ADDR_LEN]) -> Self {
        Self(octets)
    }

    /// Raw octets of the address
    pub const fn octets(&self) -> [u8; MAC_ADDR_LEN] {
        self.0
    }

    /// Check whether this is the broadcast address
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl FromStr for MacAddr {
    type Err = ChatError;

    /// Parse a colon-separated address; hex digits may be either case.
    fn from_str(s: &str) -> Result<Self> {
        let mut octets = [0u8; MAC_ADDR_LEN];
        let mut parts = s.split(':');

        for octet in octets.iter_mut() {
            let part = parts
                .next()
                .ok_or_else(|| ChatError::Parse(format!("invalid hardware address: {}", s)))?;
            if part.is_empty() || part.len() > 2 {
                return Err(ChatError::Parse(format!("invalid hardware address: {}", s)));
            }
            *octet = u8::from_str_radix(part, 16)
                .map_err(|_| ChatError::Parse(format!("invalid hardware address: {}", s)))?;
        }

        if parts.next().is_some() {
            return Err(ChatError::Parse(format!("invalid hardware address: {}", s)));
        }

        Ok(Self(octets))
    }
}

impl From<[u8; MAC_ADDR_LEN]> for MacAddr {
    fn from(octets: [u8; MAC_ADDR_LEN]) -> Self {
        Self(octets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_lowercase_colon_hex() {
        let addr = MacAddr::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        assert_eq!(addr.to_string(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn test_parse_accepts_either_case() {
        let upper: MacAddr = "AA:BB:CC:DD:EE:FF".parse().unwrap();
        let lower: MacAddr = "aa:bb:cc:dd:ee:ff".parse().unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.octets(), [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!("aa:bb:cc:dd:ee".parse::<MacAddr>().is_err());
        assert!("aa:bb:cc:dd:ee:ff:00".parse::<MacAddr>().is_err());
        assert!("aa:bb:cc:dd:ee:zz".parse::<MacAddr>().is_err());
        assert!("aabb:cc:dd:ee:ff:00".parse::<MacAddr>().is_err());
        assert!("".parse::<MacAddr>().is_err());
    }

    #[test]
    fn test_equality_is_byte_wise() {
        let a = MacAddr::new([1, 2, 3, 4, 5, 6]);
        let b: MacAddr = "01:02:03:04:05:06".parse().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, MacAddr::new([1, 2, 3, 4, 5, 7]));
    }

    #[test]
    fn test_broadcast_address() {
        assert_eq!(MacAddr::BROADCAST.octets(), [0xff; 6]);
        assert!(MacAddr::BROADCAST.is_broadcast());
        assert!(!MacAddr::new([1, 2, 3, 4, 5, 6]).is_broadcast());
    }
}
