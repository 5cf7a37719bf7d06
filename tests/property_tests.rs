//! Property-based tests using proptest
//!
//! These tests validate packet invariants across a wide range of randomly
//! generated inputs.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use awe::config::HEADER_SIZE;
use awe::error::ProtocolError;
use awe::{Header, Packet, PacketRef};
use proptest::prelude::*;

fn any_packet() -> impl Strategy<Value = Packet> {
    (
        ".{0,32}",
        "[a-z.]{0,64}",
        prop::collection::vec(any::<u8>(), 0..4096),
    )
        .prop_map(|(operation, key, value)| Packet {
            operation,
            key,
            value,
        })
}

// Property: Any packet survives an encode/decode roundtrip
proptest! {
    #[test]
    fn prop_packet_roundtrip(packet in any_packet()) {
        let bytes = packet.encode().expect("Encoding should not fail");
        let decoded = Packet::decode(&bytes).expect("Decoding should not fail");

        prop_assert_eq!(decoded, packet);
    }
}

// Property: The borrowed view decodes the same fields as the owned decode
proptest! {
    #[test]
    fn prop_packet_ref_matches_owned(packet in any_packet()) {
        let bytes = packet.encode().unwrap();
        let view = PacketRef::decode(&bytes).unwrap();

        prop_assert_eq!(view.operation, packet.operation.as_str());
        prop_assert_eq!(view.key, packet.key.as_str());
        prop_assert_eq!(view.value, packet.value.as_slice());
    }
}

// Property: Encoding is deterministic
proptest! {
    #[test]
    fn prop_packet_serialization_deterministic(packet in any_packet()) {
        prop_assert_eq!(packet.encode().unwrap(), packet.encode().unwrap());
    }
}

// Property: Encoded size is header plus the three field lengths
proptest! {
    #[test]
    fn prop_packet_size_accurate(packet in any_packet()) {
        let bytes = packet.encode().unwrap();
        let expected = HEADER_SIZE + packet.operation.len() + packet.key.len() + packet.value.len();

        prop_assert_eq!(bytes.len(), expected);
        prop_assert_eq!(packet.encoded_len(), expected);
    }
}

// Property: Header fields are the little-endian byte lengths
proptest! {
    #[test]
    fn prop_header_fields_correct(packet in any_packet()) {
        let bytes = packet.encode().unwrap();
        let op_len = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        let key_len = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
        let value_len = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize;

        prop_assert_eq!(op_len, packet.operation.len());
        prop_assert_eq!(key_len, packet.key.len());
        prop_assert_eq!(value_len, packet.value.len());
    }
}

// Property: Every strict prefix of an encoded packet is a truncation error
proptest! {
    #[test]
    fn prop_every_prefix_truncated(packet in any_packet(), cut in any::<prop::sample::Index>()) {
        let bytes = packet.encode().unwrap();
        let len = cut.index(bytes.len());

        let result = Packet::decode(&bytes[..len]);
        let is_eof = matches!(result, Err(ProtocolError::UnexpectedEof { .. }));
        prop_assert!(is_eof);
    }
}

// Property: Arbitrary input never panics, and success implies a consistent header
proptest! {
    #[test]
    fn prop_arbitrary_input_never_panics(data in prop::collection::vec(any::<u8>(), 0..256)) {
        if let Ok((packet, used)) = Packet::decode_prefix(&data) {
            let header = Header::parse(&data).unwrap();
            prop_assert_eq!(header.total_len(), used as u64);
            prop_assert!(used <= data.len());
            prop_assert_eq!(packet.encode().unwrap(), data[..used].to_vec());
        }
    }
}

// Property: Small random headers over short bodies never read out of bounds
proptest! {
    #[test]
    fn prop_random_header_bounds(
        op_len in 0u32..64,
        key_len in 0u32..64,
        value_len in 0u32..64,
        body in prop::collection::vec(any::<u8>(), 0..192)
    ) {
        let mut bytes = Vec::new();
        Header { op_len, key_len, value_len }.write(&mut bytes);
        bytes.extend_from_slice(&body);

        let declared = (op_len + key_len + value_len) as usize;
        match PacketRef::decode(&bytes) {
            Ok(view) => {
                prop_assert!(body.len() >= declared);
                prop_assert_eq!(view.value, &body[(op_len + key_len) as usize..declared]);
            }
            Err(ProtocolError::UnexpectedEof { .. }) => {
                prop_assert!(body.len() < declared);
            }
            Err(ProtocolError::InvalidUtf8 { .. }) => {
                prop_assert!(body.len() >= declared);
            }
            Err(other) => {
                prop_assert!(false, "unexpected error: {}", other);
            }
        }
    }
}

// Property: Two packets encoded back to back decode independently
proptest! {
    #[test]
    fn prop_concatenated_packets(first in any_packet(), second in any_packet()) {
        let mut bytes = first.encode().unwrap();
        bytes.extend_from_slice(&second.encode().unwrap());

        let (a, used) = Packet::decode_prefix(&bytes).unwrap();
        let b = Packet::decode(&bytes[used..]).unwrap();

        prop_assert_eq!(a, first);
        prop_assert_eq!(b, second);
    }
}
