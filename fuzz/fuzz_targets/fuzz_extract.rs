#![no_main]

use brsplice::{assemble, try_extract_bare_aligned_block};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary input must never panic, only be rejected
    let Some(block) = try_extract_bare_aligned_block(data) else {
        return;
    };

    // A bare block re-wrapped in a single-block stream extracts to itself
    let stream = assemble(&[&block]);
    assert_eq!(try_extract_bare_aligned_block(&stream).as_deref(), Some(block.as_slice()));
});
