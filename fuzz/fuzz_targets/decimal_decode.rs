#![no_main]

use libfuzzer_sys::fuzz_target;
use sbdf_types::decimal;

fuzz_target!(|data: &[u8]| {
    if data.len() == 16 {
        if let Ok(value) = decimal::decode(data) {
            // anything that decodes must re-encode without panicking
            let _ = decimal::encode(&value);
        }
    }
});
