#![no_main]

use asset_link::infrastructure::font::read_metadata;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Font table reading should never panic or read out of bounds
    let _ = read_metadata(data);
});
