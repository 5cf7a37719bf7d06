//! # Packet Stream Codec
//!
//! `tokio_util` codec that frames packets on a byte stream.
//!
//! The packet header already says how long the packet is, so frames are read
//! back-to-back with no extra length prefix:
//!
//! ```text
//! [Header(12)] [Body(N)] [Header(12)] [Body(M)] ...
//! ```
//!
//! ## Behaviour
//! - Incomplete header or body: `Ok(None)`, buffer left as is, missing
//!   capacity reserved
//! - Declared total above `max_packet_size`: `OversizedPacket`, detected from
//!   the header alone so the body is never buffered
//! - Complete frame: split off the buffer without copying, then decoded
//!
//! ## Usage
//! ```rust,no_run
//! use awe::core::codec::PacketCodec;
//! use tokio_util::codec::FramedRead;
//!
//! # fn wrap(stream: tokio::io::DuplexStream) {
//! let packets = FramedRead::new(stream, PacketCodec::new());
//! # }
//! ```
//!
//! `PacketCodec` encodes `Packet`, `&Packet` and `PacketRef`, so a
//! `FramedWrite` implements `Sink` for all three. `send` picks the item type
//! from its argument, but `flush` and `close` have none and need it spelled
//! out, e.g. `SinkExt::<Packet>::close(&mut sink)`.

use bytes::BytesMut;
use std::sync::Arc;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, trace, warn};

use crate::config::{CodecConfig, HEADER_SIZE};
use crate::core::packet::{Header, Packet, PacketRef};
use crate::error::{ProtocolError, Result};
use crate::utils::metrics::CodecMetrics;

/// Frames [`Packet`]s on a byte stream.
#[derive(Debug, Clone, Default)]
pub struct PacketCodec {
    config: CodecConfig,
    metrics: Arc<CodecMetrics>,
}

impl PacketCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec with custom limits.
    ///
    /// # Errors
    /// `ConfigError` if `config` fails [`CodecConfig::validate`], e.g. a
    /// `max_packet_size` too small to hold even an empty packet.
    pub fn with_config(config: CodecConfig) -> Result<Self> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ProtocolError::ConfigError(errors.join("; ")));
        }

        Ok(Self {
            config,
            metrics: Arc::default(),
        })
    }

    /// Report into `metrics` instead of a private counter set.
    pub fn with_metrics(mut self, metrics: Arc<CodecMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<CodecMetrics> {
        &self.metrics
    }

    fn check_size(&self, size: u64) -> Result<()> {
        let max = self.config.max_packet_size;
        if size > max as u64 {
            self.metrics.oversized();
            warn!(size, max, "Packet exceeds configured maximum");
            return Err(ProtocolError::OversizedPacket { size, max });
        }
        Ok(())
    }
}

impl Decoder for PacketCodec {
    type Item = Packet;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Packet>> {
        if src.len() < HEADER_SIZE {
            src.reserve(HEADER_SIZE - src.len());
            return Ok(None);
        }

        let header = Header::parse(src)?;
        let total = header.total_len();
        self.check_size(total)?;

        // bounded by max_packet_size, which is a usize
        let total = total as usize;
        if src.len() < total {
            src.reserve(total - src.len());
            return Ok(None);
        }

        let frame = src.split_to(total);
        match Packet::decode(&frame) {
            Ok(packet) => {
                self.metrics.packet_decoded(total as u64);
                trace!(
                    operation = %packet.operation,
                    key = %packet.key,
                    value_len = packet.value.len(),
                    "Decoded packet"
                );
                Ok(Some(packet))
            }
            Err(e) => {
                self.metrics.decode_error();
                debug!(error = %e, frame_len = total, "Dropping undecodable frame");
                Err(e)
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Packet>> {
        if let Some(packet) = self.decode(src)? {
            return Ok(Some(packet));
        }
        if src.is_empty() {
            return Ok(None);
        }

        let needed = match Header::parse(src) {
            Ok(header) => header.total_len(),
            Err(_) => HEADER_SIZE as u64,
        };
        self.metrics.decode_error();
        debug!(needed, available = src.len(), "Stream ended mid-packet");
        Err(ProtocolError::UnexpectedEof {
            needed,
            available: src.len(),
        })
    }
}

impl<'a> Encoder<PacketRef<'a>> for PacketCodec {
    type Error = ProtocolError;

    fn encode(&mut self, packet: PacketRef<'a>, dst: &mut BytesMut) -> Result<()> {
        let len = packet.encoded_len();
        self.check_size(len as u64)?;

        packet.encode_to(dst)?;
        self.metrics.packet_encoded(len as u64);
        trace!(operation = %packet.operation, key = %packet.key, len, "Encoded packet");
        Ok(())
    }
}

impl<'a> Encoder<&'a Packet> for PacketCodec {
    type Error = ProtocolError;

    fn encode(&mut self, packet: &'a Packet, dst: &mut BytesMut) -> Result<()> {
        Encoder::<PacketRef<'_>>::encode(self, packet.as_packet_ref(), dst)
    }
}

impl Encoder<Packet> for PacketCodec {
    type Error = ProtocolError;

    fn encode(&mut self, packet: Packet, dst: &mut BytesMut) -> Result<()> {
        Encoder::<PacketRef<'_>>::encode(self, packet.as_packet_ref(), dst)
    }
}
