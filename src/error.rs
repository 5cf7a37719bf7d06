//! # Error Types
//!
//! Error handling for the packet codec.
//!
//! ## Error Categories
//! - **Truncation**: the buffer ends before the header or the declared body does
//! - **Representation**: text fields that are not UTF-8, fields too long for a
//!   32-bit length slot
//! - **Limits**: packets larger than the configured maximum
//! - **I/O and configuration**: stream and config-file failures
//!
//! Header and body truncation share one variant, `UnexpectedEof`. Callers that
//! need to tell them apart can compare `needed` against [`HEADER_SIZE`].
//!
//! [`HEADER_SIZE`]: crate::config::HEADER_SIZE
//!
//! ## Example Usage
//! ```rust
//! use awe::error::ProtocolError;
//! use awe::Packet;
//!
//! match Packet::decode(&[0x03, 0x00]) {
//!     Err(ProtocolError::UnexpectedEof { needed, available }) => {
//!         assert_eq!(needed, 12);
//!         assert_eq!(available, 2);
//!     }
//!     other => panic!("expected truncation, got {other:?}"),
//! }
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// One of the three length-prefixed regions of a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Operation,
    Key,
    Value,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Operation => "operation",
            Field::Key => "key",
            Field::Value => "value",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ProtocolError is the primary error type for all codec operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The buffer is shorter than the header, or than the total the header declares.
    #[error("unexpected end of input: need {needed} bytes, have {available}")]
    UnexpectedEof { needed: u64, available: usize },

    /// Reserved for structural validation. No codec path produces it today.
    #[error("invalid packet")]
    InvalidPacket,

    #[error("{field} is not valid UTF-8")]
    InvalidUtf8 { field: Field },

    #[error("{field} is {len} bytes, exceeds the 32-bit length field")]
    FieldTooLarge { field: Field, len: usize },

    #[error("packet too large: {size} bytes (max {max})")]
    OversizedPacket { size: u64, max: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
