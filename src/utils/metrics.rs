//! Codec Metrics
//!
//! Counters for packets and bytes passing through a [`PacketCodec`].
//!
//! Uses atomic counters so one instance can be shared between the read and
//! write halves of a connection.
//!
//! [`PacketCodec`]: crate::core::codec::PacketCodec

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Counters updated by the stream codec
#[derive(Debug, Default)]
pub struct CodecMetrics {
    /// Packets written by the encoder
    pub packets_encoded: AtomicU64,
    /// Packets produced by the decoder
    pub packets_decoded: AtomicU64,
    /// Bytes written by the encoder, headers included
    pub bytes_encoded: AtomicU64,
    /// Bytes consumed by the decoder, headers included
    pub bytes_decoded: AtomicU64,
    /// Frames rejected for exceeding the configured maximum
    pub oversized_rejected: AtomicU64,
    /// Any other decode failure
    pub decode_errors: AtomicU64,
}

impl CodecMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an encoded packet
    pub fn packet_encoded(&self, byte_count: u64) {
        self.packets_encoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_encoded.fetch_add(byte_count, Ordering::Relaxed);
    }

    /// Record a decoded packet
    pub fn packet_decoded(&self, byte_count: u64) {
        self.packets_decoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_decoded.fetch_add(byte_count, Ordering::Relaxed);
    }

    pub fn oversized(&self) {
        self.oversized_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decode_error(&self) {
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            packets_encoded: self.packets_encoded.load(Ordering::Relaxed),
            packets_decoded: self.packets_decoded.load(Ordering::Relaxed),
            bytes_encoded: self.bytes_encoded.load(Ordering::Relaxed),
            bytes_decoded: self.bytes_decoded.load(Ordering::Relaxed),
            oversized_rejected: self.oversized_rejected.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
        }
    }

    /// Log current metrics
    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        info!(
            packets_encoded = snapshot.packets_encoded,
            packets_decoded = snapshot.packets_decoded,
            bytes_encoded = snapshot.bytes_encoded,
            bytes_decoded = snapshot.bytes_decoded,
            oversized_rejected = snapshot.oversized_rejected,
            decode_errors = snapshot.decode_errors,
            "Codec metrics snapshot"
        );
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub packets_encoded: u64,
    pub packets_decoded: u64,
    pub bytes_encoded: u64,
    pub bytes_decoded: u64,
    pub oversized_rejected: u64,
    pub decode_errors: u64,
}
