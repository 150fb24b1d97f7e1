#![no_main]

use brsplice::{decode_header_length, WindowBits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some(&first) = data.first() else {
        return;
    };

    // A recognized header length always belongs to a decodable window code
    // of that length; the full decoder may accept more.
    match (decode_header_length(first), WindowBits::decode(data)) {
        (Ok(len), Ok(window)) => assert_eq!(window.code().1, len),
        (Ok(len), Err(e)) => panic!("length {len} for 0x{first:02x} but decode failed: {e}"),
        (Err(_), Ok(window)) => assert!(matches!(window.value(), 19 | 21 | 23)),
        (Err(_), Err(_)) => {}
    }
});
