//! # awe
//!
//! Minimal binary framing for a single message unit: an operation tag, a
//! routing key and an opaque value.
//!
//! ```text
//! [OpLen u32le] [KeyLen u32le] [ValueLen u32le] [Operation] [Key] [Value]
//! ```
//!
//! The packet is the primitive beneath a publish/subscribe or queueing
//! protocol. This crate only frames it; dispatch, checksums and compression
//! belong to the layer above, which can use the reserved [`Options`] byte.
//!
//! ## Example
//! ```rust
//! use awe::Packet;
//!
//! let packet = Packet::new("PUB", "topic.person.say", b"hello".to_vec());
//! let bytes = packet.encode()?;
//! assert_eq!(&bytes[..4], &[3, 0, 0, 0]);
//!
//! let decoded = Packet::decode(&bytes)?;
//! assert_eq!(decoded, packet);
//! # Ok::<(), awe::ProtocolError>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::config::{HEADER_SIZE, MARKER_SIZE};
pub use crate::core::codec::PacketCodec;
pub use crate::core::options::{MessageKind, Options};
pub use crate::core::packet::{Header, Packet, PacketRef};
pub use crate::error::{Field, ProtocolError, Result};
