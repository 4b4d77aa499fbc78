#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Untrusted containers: trailer parsing and inflation must not panic
    let _ = ecucsv::container::Trailer::locate(data);
    let _ = ecucsv::container::decompress(data);
});
