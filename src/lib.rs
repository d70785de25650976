//! # lanchatter
//!
//! Broadcast chat over raw Ethernet frames. The tool captures every frame
//! seen on a network interface, picks out the ones carrying its lightweight
//! chat protocol, and injects broadcast frames for locally typed lines.
//! There is no discovery, no server and no IP layer involved: every station
//! on the same link segment that runs the tool sees every message.
//!
//! ## Architecture
//!
//! The implementation is organized into several modules:
//! - `wire`: hardware addresses as they appear on the wire
//! - `frame`: Ethernet frame parsing and serialization
//! - `chat`: chat payload classification and construction
//! - `link`: the capture/injection handle, split into receive and send halves
//! - `daemon`: configuration and the two long-running loops

pub mod chat;
pub mod frame;
pub mod link;
pub mod wire;

// Daemon modules
pub mod daemon;

// Re-export commonly used types
pub use crate::{chat::*, frame::*, wire::*};

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("interface not found: {0}")]
    InterfaceNotFound(String),

    #[error("interface {0} has no hardware address")]
    NoHardwareAddress(String),

    #[error("interface {0} does not provide an Ethernet channel")]
    UnsupportedChannel(String),

    #[error("interface {0} does not support frame injection")]
    InjectionNotSupported(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("message too large: {size} bytes (max: {max})")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("system error: {0}")]
    System(String),
}

pub type Result<T> = std::result::Result<T, ChatError>;
