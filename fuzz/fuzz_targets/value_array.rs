#![no_main]

use libfuzzer_sys::fuzz_target;
use sbdf_format::ValueArray;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    if let Ok(array) = ValueArray::read(&mut Cursor::new(data)) {
        let _ = array.row_count();
        let _ = array.values();
    }
    // the skip path walks the same bytes without materializing
    let _ = ValueArray::skip(&mut Cursor::new(data));
});
