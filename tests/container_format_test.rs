//! Integration tests for the .cmp container format
//!
//! These tests verify:
//! 1. Byte-exact round trips for any serializer output
//! 2. The trailer layout (NUL + ASCII decimal uncompressed length)
//! 3. Recovery from the trailer alone, without any header

use ecucsv::container::{self, ContainerError, Trailer};
use ecucsv::extract::RecordBuilder;
use ecucsv::serialize::serialize;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use proptest::prelude::*;
use std::io::Write;

#[test]
fn test_container_layout() {
    let csv = "temp,98.6\rch1,1,2\rch2,9";
    let packed = container::compress(csv).unwrap();

    let trailer = Trailer::locate(&packed).unwrap().unwrap();
    assert_eq!(packed[trailer.payload_len], 0x00);
    assert_eq!(&packed[trailer.payload_len + 1..], csv.len().to_string().as_bytes());
    assert_eq!(trailer.declared_size, 24);
}

/// Containers written by any raw-DEFLATE encoder are readable
#[test]
fn test_foreign_encoder_container() {
    let text = "x".repeat(42);
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(text.as_bytes()).unwrap();
    let mut packed = encoder.finish().unwrap();
    packed.extend_from_slice(b"\x0042");

    let csv = container::decompress_to_string(&packed).unwrap();
    assert_eq!(csv.len(), 42);
}

#[test]
fn test_trailer_only_container_is_corrupt() {
    let err = container::decompress(b"\x0012").unwrap_err();
    assert!(!matches!(err, ContainerError::MissingTrailer));
}

#[test]
fn test_non_utf8_payload_rejected_as_text() {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&[0xC3, 0x28]).unwrap();
    let mut packed = encoder.finish().unwrap();
    packed.extend_from_slice(b"\x002");

    assert_eq!(container::decompress(&packed).unwrap(), vec![0xC3, 0x28]);
    assert!(matches!(
        container::decompress_to_string(&packed),
        Err(ContainerError::NotUtf8(_))
    ));
}

fn field() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_.:°µ-]{1,12}"
}

proptest! {
    /// decompress(compress(S)) == S for any blob the serializer can emit
    #[test]
    fn test_serializer_output_roundtrips(
        scalars in prop::collection::vec((field(), field()), 0..20),
        series in prop::collection::vec((field(), prop::collection::vec(field(), 0..10)), 0..10),
        level in 0u32..=9,
    ) {
        let mut builder = RecordBuilder::new();
        for (key, value) in &scalars {
            builder.start_element(key, Vec::<(&str, &str)>::new()).unwrap();
            builder.text(value);
        }
        for (name, values) in &series {
            builder.start_element("sample", [("name", name.as_str())]).unwrap();
            for value in values {
                builder
                    .start_element("sample", [("name", name.as_str()), ("value", value.as_str())])
                    .unwrap();
            }
        }
        let csv = serialize(&builder.finish());

        let packed = container::compress_with_level(&csv, level).unwrap();
        let restored = container::decompress_to_string(&packed).unwrap();
        prop_assert_eq!(restored, csv);
    }

    /// Arbitrary bytes never panic the decoder
    #[test]
    fn test_decompress_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = container::decompress(&bytes);
    }
}
