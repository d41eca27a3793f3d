#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic the full-file reader
    let _ = sbdf::read_sbdf(Cursor::new(data));
});
