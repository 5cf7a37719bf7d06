//! # Packet
//!
//! In-memory packet representation and its wire encoding.
//!
//! ## Wire Format
//! ```text
//! [OpLen(4)] [KeyLen(4)] [ValueLen(4)] [Operation(OpLen)] [Key(KeyLen)] [Value(ValueLen)]
//! ```
//! All lengths are unsigned 32-bit little-endian. There is no magic, version
//! or checksum; the header only describes where each field ends.
//!
//! ## Ownership
//! [`Packet::decode`] copies every field out of the input. [`PacketRef::decode`]
//! borrows them instead, so the input buffer stays borrowed for as long as the
//! view is alive and cannot be mutated or dropped underneath it.
//!
//! ## Safety Against Malformed Input
//! - The header is checked for presence before any length is read
//! - The declared total is summed in `u64`, so three maximal lengths cannot wrap
//! - Slicing happens only after the total has been checked against the buffer

use bytes::{Buf, BufMut, BytesMut};
use std::str;

use crate::config::HEADER_SIZE;
use crate::error::{Field, ProtocolError, Result};

/// Fixed 12-byte packet header: the byte length of each field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub op_len: u32,
    pub key_len: u32,
    pub value_len: u32,
}

impl Header {
    /// Build a header from in-memory field lengths.
    ///
    /// # Errors
    /// `FieldTooLarge` if a length does not fit the 32-bit slot.
    pub fn from_lengths(op_len: usize, key_len: usize, value_len: usize) -> Result<Self> {
        Ok(Self {
            op_len: length_slot(Field::Operation, op_len)?,
            key_len: length_slot(Field::Key, key_len)?,
            value_len: length_slot(Field::Value, value_len)?,
        })
    }

    /// Read the header from the start of `buf`. Trailing bytes are not inspected.
    ///
    /// # Errors
    /// `UnexpectedEof` if `buf` is shorter than [`HEADER_SIZE`].
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let mut raw = buf.get(..HEADER_SIZE).ok_or(ProtocolError::UnexpectedEof {
            needed: HEADER_SIZE as u64,
            available: buf.len(),
        })?;

        Ok(Self {
            op_len: raw.get_u32_le(),
            key_len: raw.get_u32_le(),
            value_len: raw.get_u32_le(),
        })
    }

    /// Append the 12 header bytes to `dst`.
    pub fn write<B: BufMut>(&self, dst: &mut B) {
        dst.put_u32_le(self.op_len);
        dst.put_u32_le(self.key_len);
        dst.put_u32_le(self.value_len);
    }

    /// Combined length of the three field bodies.
    pub fn body_len(&self) -> u64 {
        u64::from(self.op_len) + u64::from(self.key_len) + u64::from(self.value_len)
    }

    /// Header plus body: the number of bytes the whole packet occupies.
    pub fn total_len(&self) -> u64 {
        HEADER_SIZE as u64 + self.body_len()
    }
}

fn length_slot(field: Field, len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| ProtocolError::FieldTooLarge { field, len })
}

fn text(field: Field, bytes: &[u8]) -> Result<&str> {
    str::from_utf8(bytes).map_err(|_| ProtocolError::InvalidUtf8 { field })
}

/// An owned packet: operation tag, routing key and opaque value.
///
/// `operation` and `key` are text, so decoding rejects them with
/// [`ProtocolError::InvalidUtf8`] when their bytes are not valid UTF-8.
/// `value` is never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Packet {
    pub operation: String,
    pub key: String,
    pub value: Vec<u8>,
}

impl Packet {
    pub fn new(
        operation: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            operation: operation.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    /// Borrowed view of this packet, for encoding without cloning.
    pub fn as_packet_ref(&self) -> PacketRef<'_> {
        PacketRef {
            operation: &self.operation,
            key: &self.key,
            value: &self.value,
        }
    }

    pub fn header(&self) -> Result<Header> {
        self.as_packet_ref().header()
    }

    /// Exact size of the encoded packet.
    pub fn encoded_len(&self) -> usize {
        self.as_packet_ref().encoded_len()
    }

    /// Serialize into a freshly allocated buffer of exactly `encoded_len()` bytes.
    pub fn encode(&self) -> Result<Vec<u8>> {
        self.as_packet_ref().encode()
    }

    /// Append the encoded packet to `dst`.
    pub fn encode_to(&self, dst: &mut BytesMut) -> Result<()> {
        self.as_packet_ref().encode_to(dst)
    }

    /// Decode a packet from the start of `buf`, copying every field.
    ///
    /// Bytes after the declared total are ignored.
    ///
    /// # Errors
    /// - `UnexpectedEof` if `buf` is shorter than the header or the declared total
    /// - `InvalidUtf8` if the operation or key bytes are not valid UTF-8
    pub fn decode(buf: &[u8]) -> Result<Self> {
        PacketRef::decode(buf).map(PacketRef::into_owned)
    }

    /// Like [`decode`](Self::decode), also returning how many bytes the packet used.
    pub fn decode_prefix(buf: &[u8]) -> Result<(Self, usize)> {
        let (packet, used) = PacketRef::decode_prefix(buf)?;
        Ok((packet.into_owned(), used))
    }
}

impl From<PacketRef<'_>> for Packet {
    fn from(packet: PacketRef<'_>) -> Self {
        packet.into_owned()
    }
}

/// A packet whose fields borrow from another buffer.
///
/// Produced by [`PacketRef::decode`] for zero-copy reads, or by
/// [`Packet::as_packet_ref`] to encode without cloning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PacketRef<'a> {
    pub operation: &'a str,
    pub key: &'a str,
    pub value: &'a [u8],
}

impl<'a> PacketRef<'a> {
    pub fn new(operation: &'a str, key: &'a str, value: &'a [u8]) -> Self {
        Self {
            operation,
            key,
            value,
        }
    }

    pub fn header(&self) -> Result<Header> {
        Header::from_lengths(self.operation.len(), self.key.len(), self.value.len())
    }

    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.operation.len() + self.key.len() + self.value.len()
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let header = self.header()?;
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.write(header, &mut buf);
        Ok(buf)
    }

    pub fn encode_to(&self, dst: &mut BytesMut) -> Result<()> {
        let header = self.header()?;
        dst.reserve(self.encoded_len());
        self.write(header, dst);
        Ok(())
    }

    fn write<B: BufMut>(&self, header: Header, dst: &mut B) {
        header.write(dst);
        dst.put_slice(self.operation.as_bytes());
        dst.put_slice(self.key.as_bytes());
        dst.put_slice(self.value);
    }

    /// Decode a view over `buf`. The returned fields point into `buf`.
    pub fn decode(buf: &'a [u8]) -> Result<Self> {
        Self::decode_prefix(buf).map(|(packet, _)| packet)
    }

    /// Decode a view over the start of `buf` and report the bytes consumed.
    pub fn decode_prefix(buf: &'a [u8]) -> Result<(Self, usize)> {
        let header = Header::parse(buf)?;

        let total = header.total_len();
        if (buf.len() as u64) < total {
            return Err(ProtocolError::UnexpectedEof {
                needed: total,
                available: buf.len(),
            });
        }
        // total <= buf.len(), so every length below fits in usize
        let total = total as usize;

        let body = &buf[HEADER_SIZE..total];
        let (operation, rest) = body.split_at(header.op_len as usize);
        let (key, value) = rest.split_at(header.key_len as usize);

        let packet = Self {
            operation: text(Field::Operation, operation)?,
            key: text(Field::Key, key)?,
            value,
        };
        Ok((packet, total))
    }

    pub fn into_owned(self) -> Packet {
        Packet {
            operation: self.operation.to_owned(),
            key: self.key.to_owned(),
            value: self.value.to_vec(),
        }
    }
}
