//! # Core Packet Components
//!
//! Packet representation, wire encoding and stream framing.
//!
//! ## Components
//! - **Packet**: owned and borrowed packets, the 12-byte header, encode/decode
//! - **Codec**: Tokio codec for framing packets over byte streams
//! - **Options**: reserved option byte for the protocol layer above
//!
//! ## Wire Format
//! ```text
//! [OpLen(4)] [KeyLen(4)] [ValueLen(4)] [Operation] [Key] [Value]
//! ```
//!
//! ## Security
//! - Header presence checked before any length is read
//! - Declared total summed without overflow and checked before slicing
//! - Stream codec rejects oversized packets from the header alone

pub mod codec;
pub mod options;
pub mod packet;
