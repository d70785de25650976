//! Capture/injection link handle
//!
//! Opening an interface yields the two halves of one full-duplex link: a
//! blocking [`FrameSource`] for captured frames and a synchronous
//! [`FrameSink`] for injection. The halves are independent capabilities
//! with their own state, so the receive side never serializes against the
//! send side.

use std::time::Duration;

use pnet::datalink::{self, Channel, DataLinkReceiver, DataLinkSender, NetworkInterface};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::wire::MacAddr;
use crate::{ChatError, Result};

/// Capture configuration for one interface
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Network interface name
    pub interface: String,
    /// Deliver frames addressed to other stations as well
    pub promiscuous: bool,
    /// Read timeout in milliseconds; `None` blocks until a frame arrives
    pub read_timeout_ms: Option<u64>,
    /// Kernel read buffer size in bytes
    pub read_buffer_size: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            interface: String::new(),
            promiscuous: true,
            read_timeout_ms: None,
            read_buffer_size: 65535,
        }
    }
}

impl LinkConfig {
    /// Read timeout as a `Duration`
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }
}

/// Blocking source of captured frames
///
/// One pull per frame, in arrival order. An error is terminal for the
/// capture stream.
pub trait FrameSource: Send {
    /// Block until the next raw frame arrives and return a copy of it
    fn next_frame(&mut self) -> Result<Vec<u8>>;
}

/// Synchronous sink transmitting one raw frame onto the link
pub trait FrameSink: Send {
    /// Transmit the frame, returning once it has been handed to the driver
    fn send_frame(&mut self, frame: &[u8]) -> Result<()>;
}

/// Receive half of an open link
pub struct CaptureSource {
    rx: Box<dyn DataLinkReceiver>,
}

impl FrameSource for CaptureSource {
    fn next_frame(&mut self) -> Result<Vec<u8>> {
        let frame = self.rx.next()?;
        Ok(frame.to_vec())
    }
}

/// Send half of an open link
pub struct InjectSink {
    interface: String,
    tx: Box<dyn DataLinkSender>,
}

impl FrameSink for InjectSink {
    fn send_frame(&mut self, frame: &[u8]) -> Result<()> {
        match self.tx.send_to(frame, None) {
            Some(result) => Ok(result?),
            None => Err(ChatError::InjectionNotSupported(self.interface.clone())),
        }
    }
}

/// An open full-duplex link: both halves plus the local identity
pub struct Link {
    /// Receive half, owned by the receive loop
    pub source: CaptureSource,
    /// Send half, owned by the send loop
    pub sink: InjectSink,
    /// Hardware address of the local interface
    pub local_addr: MacAddr,
}

impl Link {
    /// Open the named interface for capture and injection.
    ///
    /// Resolves the interface, reads its hardware address and sets up an
    /// Ethernet channel. Any failure here is fatal for the caller: nothing
    /// useful can happen without a live handle and a local address.
    pub fn open(config: &LinkConfig) -> Result<Self> {
        let interface = find_interface(&config.interface)?;
        let local_addr = interface
            .mac
            .map(|mac| MacAddr::new(mac.octets()))
            .ok_or_else(|| ChatError::NoHardwareAddress(config.interface.clone()))?;

        let channel_config = datalink::Config {
            read_buffer_size: config.read_buffer_size,
            read_timeout: config.read_timeout(),
            promiscuous: config.promiscuous,
            ..Default::default()
        };

        let (tx, rx) = match datalink::channel(&interface, channel_config) {
            Ok(Channel::Ethernet(tx, rx)) => (tx, rx),
            Ok(_) => return Err(ChatError::UnsupportedChannel(config.interface.clone())),
            Err(e) => return Err(ChatError::Io(e)),
        };

        debug!("opened link on {} as {}", config.interface, local_addr);

        Ok(Self {
            source: CaptureSource { rx },
            sink: InjectSink {
                interface: config.interface.clone(),
                tx,
            },
            local_addr,
        })
    }
}

fn find_interface(name: &str) -> Result<NetworkInterface> {
    datalink::interfaces()
        .into_iter()
        .find(|iface| iface.name == name)
        .ok_or_else(|| ChatError::InterfaceNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_config_defaults() {
        let config = LinkConfig::default();
        assert!(config.interface.is_empty());
        assert!(config.promiscuous);
        assert!(config.read_timeout_ms.is_none());
        assert_eq!(config.read_buffer_size, 65535);
    }

    #[test]
    fn test_read_timeout_conversion() {
        let config = LinkConfig {
            read_timeout_ms: Some(250),
            ..Default::default()
        };
        assert_eq!(config.read_timeout(), Some(Duration::from_millis(250)));
        assert_eq!(LinkConfig::default().read_timeout(), None);
    }

    #[test]
    fn test_open_unknown_interface_fails() {
        let config = LinkConfig {
            interface: "definitely-not-a-nic0".to_string(),
            ..Default::default()
        };
        match Link::open(&config) {
            Err(ChatError::InterfaceNotFound(name)) => {
                assert_eq!(name, "definitely-not-a-nic0");
            }
            Ok(_) => panic!("open must fail for an unknown interface"),
            Err(other) => panic!("unexpected error: {}", other),
        }
    }
}
