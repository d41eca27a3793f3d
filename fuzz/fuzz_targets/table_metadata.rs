#![no_main]

use libfuzzer_sys::fuzz_target;
use sbdf_format::TableMetadata;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let _ = TableMetadata::read(&mut Cursor::new(data));
});
