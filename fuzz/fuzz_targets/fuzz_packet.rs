#![no_main]

use awe::{Packet, PacketRef};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary bytes must never panic or read out of bounds
    let borrowed = PacketRef::decode_prefix(data);
    let owned = Packet::decode_prefix(data);
    assert_eq!(borrowed.is_ok(), owned.is_ok());

    // Anything that decodes re-encodes to the bytes it came from
    if let Ok((packet, used)) = owned {
        let bytes = packet.encode().expect("decoded packet re-encodes");
        assert_eq!(&bytes[..], &data[..used]);
    }
});
