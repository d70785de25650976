//! Daemon configuration
//!
//! Configuration is resolved from an optional TOML file at a fixed default
//! path plus the command line. The interface name always comes from the
//! command line and overrides whatever the file says.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::link::LinkConfig;
use crate::{ChatError, Result};

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "/etc/lanchatter.toml";

/// Top-level daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// Capture configuration
    pub link: LinkConfig,
}

impl DaemonConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file is not an error; defaults are used instead. A file
    /// that exists but does not parse is a configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("configuration file not found: {}, using defaults", path.display());
            return Ok(Self::default());
        }

        debug!("loading configuration from: {}", path.display());
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ChatError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.link.interface.is_empty() {
            return Err(ChatError::Config("no interface selected".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let config = DaemonConfig::default();
        assert!(config.link.interface.is_empty());
        assert!(config.link.promiscuous);
        assert!(config.link.read_timeout_ms.is_none());
    }

    #[test]
    fn test_load_nonexistent_config_falls_back_to_defaults() {
        let path = PathBuf::from("/nonexistent/lanchatter.toml");
        let config = DaemonConfig::load(&path).unwrap();
        assert!(config.link.interface.is_empty());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: DaemonConfig = toml::from_str(
            r#"
            [link]
            interface = "eth0"
            promiscuous = false
            "#,
        )
        .unwrap();

        assert_eq!(config.link.interface, "eth0");
        assert!(!config.link.promiscuous);
        assert_eq!(config.link.read_buffer_size, 65535);
    }

    #[test]
    fn test_validation_requires_interface() {
        let config = DaemonConfig::default();
        assert!(config.validate().is_err());

        let mut config = DaemonConfig::default();
        config.link.interface = "eth0".to_string();
        assert!(config.validate().is_ok());
    }
}
