//! Chat daemon module
//!
//! This module contains the daemon implementation: configuration handling,
//! the receive and send loops, and the glue that wires a configuration to
//! an opened link.

pub mod config;
pub mod core;

// Re-export main types
pub use config::DaemonConfig;
pub use core::ChatDaemon;

use tracing::info;

use crate::link::Link;
use crate::Result;

/// Daemon builder for easy configuration
#[derive(Debug, Default)]
pub struct DaemonBuilder {
    config: Option<DaemonConfig>,
    interface: Option<String>,
}

impl DaemonBuilder {
    /// Create new daemon builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set daemon configuration
    pub fn with_config(mut self, config: DaemonConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set network interface, overriding the configured one
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = Some(interface.into());
        self
    }

    /// Open the link and assemble the daemon.
    ///
    /// The local hardware address is resolved here, once; both loops share
    /// it read-only for the lifetime of the process.
    pub fn build(self) -> Result<ChatDaemon> {
        let mut config = self.config.unwrap_or_default();
        if let Some(interface) = self.interface {
            config.link.interface = interface;
        }
        config.validate()?;

        let link = Link::open(&config.link)?;
        info!(
            "listening on {} as {}",
            config.link.interface, link.local_addr
        );

        Ok(ChatDaemon::new(link))
    }
}

/// Check whether the process is privileged enough for raw sockets
pub fn is_privileged() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(unix))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChatError;

    #[test]
    fn test_builder_requires_an_interface() {
        match DaemonBuilder::new().with_config(DaemonConfig::default()).build() {
            Err(ChatError::Config(_)) => {}
            Ok(_) => panic!("build must fail without an interface"),
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_builder_interface_overrides_config() {
        // The unknown interface shows the override reached link resolution.
        match DaemonBuilder::new()
            .with_config(DaemonConfig::default())
            .with_interface("definitely-not-a-nic0")
            .build()
        {
            Err(ChatError::InterfaceNotFound(name)) => {
                assert_eq!(name, "definitely-not-a-nic0");
            }
            Ok(_) => panic!("build must fail for an unknown interface"),
            Err(other) => panic!("unexpected error: {}", other),
        }
    }
}
