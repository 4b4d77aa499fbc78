#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Extraction must either succeed or fail with an error, never panic
    if let Ok(records) = ecucsv::extract::extract_bytes(data) {
        let csv = ecucsv::serialize::serialize(&records);

        // Anything the serializer emits must survive the container
        let packed = ecucsv::container::compress(&csv).expect("compression into Vec cannot fail");
        let restored = ecucsv::container::decompress_to_string(&packed).expect("roundtrip failed");
        assert_eq!(restored, csv);
    }
});
