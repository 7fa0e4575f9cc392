#![no_main]
use huffpack::{compress, decompress};
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes must decode or fail cleanly. Anything that decodes must
// re-encode to the same container.
fuzz_target!(|data: &[u8]| {
    if let Ok(restored) = decompress(data) {
        assert_eq!(compress(&restored).unwrap(), data);
    }
});
