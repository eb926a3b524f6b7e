#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = smile_value::from_slice(data) {
        let bytes = smile_value::to_vec(&value).unwrap();
        let _ = smile_value::from_slice(&bytes).unwrap();
    }
});
