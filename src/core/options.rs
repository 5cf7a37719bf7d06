//! # Option Byte
//!
//! Single-byte option space reserved for the protocol layer built on top of
//! packet framing: fast unmarshalling, checksums, compression and message-type
//! tags.
//!
//! The packet codec never reads or writes these bits. They are exposed so the
//! values stay fixed for any layer that does.
//!
//! ## Bit Layout
//! ```text
//! bit 7      6      5      4     3     2      1        0
//!     COMPR  QUEUE  UNSUB  SUB   PUB   CRC32  FAST_UM  (unused, RAW = 0)
//! ```

use bitflags::bitflags;

bitflags! {
    /// Set of independent option bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Options: u8 {
        /// Fast-path unmarshalling.
        const FAST_UNMARSHAL = 1 << 1;
        /// CRC32 checksum over the payload.
        const CRC32 = 1 << 2;
        /// Publish message.
        const PUB = 1 << 3;
        /// Subscribe message.
        const SUB = 1 << 4;
        /// Unsubscribe message.
        const UNSUB = 1 << 5;
        /// Queue message.
        const QUEUE = 1 << 6;
        /// Compressed payload.
        const COMPRESS = 1 << 7;
    }
}

impl Options {
    /// No options: plain encoding.
    pub const RAW: Self = Self::empty();

    /// Every message-type tag.
    pub const MESSAGE_KINDS: Self = Self::PUB
        .union(Self::SUB)
        .union(Self::UNSUB)
        .union(Self::QUEUE);

    /// The message kind tagged in this set, if exactly one is present.
    pub fn message_kind(self) -> Option<MessageKind> {
        let tags = self.intersection(Self::MESSAGE_KINDS);
        MessageKind::ALL.into_iter().find(|kind| tags == kind.flag())
    }

    /// Replace whatever message kind is tagged with `kind`.
    pub fn with_message_kind(self, kind: MessageKind) -> Self {
        self.difference(Self::MESSAGE_KINDS).union(kind.flag())
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::RAW
    }
}

/// Message-type tag carried in the option byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Publish,
    Subscribe,
    Unsubscribe,
    Queue,
}

impl MessageKind {
    pub const ALL: [MessageKind; 4] = [
        MessageKind::Publish,
        MessageKind::Subscribe,
        MessageKind::Unsubscribe,
        MessageKind::Queue,
    ];

    /// The option bit for this kind
    pub fn flag(self) -> Options {
        match self {
            MessageKind::Publish => Options::PUB,
            MessageKind::Subscribe => Options::SUB,
            MessageKind::Unsubscribe => Options::UNSUB,
            MessageKind::Queue => Options::QUEUE,
        }
    }
}
