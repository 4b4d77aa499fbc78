use super::*;
use std::fs;

const SAMPLE_ECU: &str = r#"<root><temp>98.6</temp><sample name="ch1" value="1"/><sample name="ch1" value="2"/><sample name="ch2" value="9"/></root>"#;
const SAMPLE_CSV: &str = "temp,98.6\rch1,1,2\rch2,9";

// Output names are cut at the first '.' of the whole path, so the default
// ".tmp" prefix would truncate every output to the temp root
fn tempdir() -> std::io::Result<tempfile::TempDir> {
    tempfile::Builder::new().prefix("ecucsv-").tempdir()
}

#[test]
fn test_output_path_truncates_at_first_dot() {
    assert_eq!(output_path("a.b.ecu", "csv"), PathBuf::from("a.csv"));
    assert_eq!(output_path("a.b.ecu", "cmp"), PathBuf::from("a.cmp"));
    assert_eq!(output_path("run.ecu", "cmp"), PathBuf::from("run.cmp"));
    assert_eq!(output_path("noext", "csv"), PathBuf::from("noext.csv"));
}

#[test]
fn test_output_path_cuts_whole_path_at_first_dot() {
    assert_eq!(output_path("/data/logs/run.ecu", "csv"), PathBuf::from("/data/logs/run.csv"));
    // A dotted directory truncates the path inside the directory name
    assert_eq!(output_path("/data/v1.2/run.ecu", "csv"), PathBuf::from("/data/v1.csv"));
    assert_eq!(output_path("./run.ecu", "cmp"), PathBuf::from(".cmp"));
}

#[test]
fn test_encoder_failure_is_io() {
    let err = encode_error(
        Path::new("run.ecu"),
        crate::container::ContainerError::DeflateError(std::io::Error::new(
            std::io::ErrorKind::Other,
            "encoder",
        )),
    );
    assert_eq!(err.kind(), FailureKind::Io);
}

#[test]
fn test_mode_extensions() {
    assert_eq!(ConversionMode::CsvOnly.output_extension(), "csv");
    assert_eq!(ConversionMode::Compress.output_extension(), "cmp");
    assert_eq!(ConversionMode::Decompress.output_extension(), "csv");
    assert_eq!(ConversionMode::Decompress.input_extension(), "cmp");
}

#[test]
fn test_mode_from_str() {
    assert_eq!("csv-only".parse::<ConversionMode>().unwrap(), ConversionMode::CsvOnly);
    assert_eq!("COMPRESS".parse::<ConversionMode>().unwrap(), ConversionMode::Compress);
    assert!("zip".parse::<ConversionMode>().is_err());
}

#[test]
fn test_csv_only_writes_blob() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("run.ecu");
    fs::write(&input, SAMPLE_ECU).unwrap();

    let outcome = Converter::new().csv_only(&input).unwrap();
    let output = dir.path().join("run.csv");

    assert_eq!(outcome.output(), Some(output.as_path()));
    assert_eq!(fs::read_to_string(&output).unwrap(), SAMPLE_CSV);

    if let ConversionOutcome::Written { stats, .. } = outcome {
        assert_eq!(stats.scalar_count, 1);
        assert_eq!(stats.series_count, 2);
        assert_eq!(stats.value_count, 3);
        assert_eq!(stats.csv_bytes, SAMPLE_CSV.len() as u64);
        assert_eq!(stats.compression_ratio, 0.0);
    }
}

#[test]
fn test_compress_then_decompress_restores_csv() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("run.ecu");
    fs::write(&input, SAMPLE_ECU).unwrap();
    let converter = Converter::new();

    let outcome = converter.convert(&input, ConversionMode::Compress).unwrap();
    let packed = dir.path().join("run.cmp");
    assert_eq!(outcome.output(), Some(packed.as_path()));

    converter.convert(&packed, ConversionMode::Decompress).unwrap();
    assert_eq!(fs::read_to_string(dir.path().join("run.csv")).unwrap(), SAMPLE_CSV);
}

#[test]
fn test_outputs_overwrite_existing_files() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("run.ecu");
    fs::write(&input, SAMPLE_ECU).unwrap();
    fs::write(dir.path().join("run.csv"), "stale content that is longer than the blob").unwrap();

    Converter::new().csv_only(&input).unwrap();
    assert_eq!(fs::read_to_string(dir.path().join("run.csv")).unwrap(), SAMPLE_CSV);
}

#[test]
fn test_decompress_without_trailer_is_skipped() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.cmp");
    fs::write(&input, b"no separator in here").unwrap();

    let outcome = Converter::new().decompress(&input).unwrap();

    assert!(matches!(outcome, ConversionOutcome::Skipped { .. }));
    assert!(!dir.path().join("broken.csv").exists());
}

#[test]
fn test_decompress_bad_trailer_is_corrupt() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.cmp");
    fs::write(&input, b"\x03\x00abc").unwrap();

    let err = Converter::new().decompress(&input).unwrap_err();
    assert_eq!(err.kind(), FailureKind::CorruptContainer);
    assert!(!dir.path().join("bad.csv").exists());
}

#[test]
fn test_malformed_input_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.ecu");
    fs::write(&input, "<root><a>1</root>").unwrap();

    let err = Converter::new().compress(&input).unwrap_err();
    assert_eq!(err.kind(), FailureKind::MalformedXml);
    assert!(!dir.path().join("bad.cmp").exists());
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempdir().unwrap();
    let err = Converter::new()
        .csv_only(dir.path().join("missing.ecu"))
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Io);
}

#[test]
fn test_batch_continues_after_failure() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.ecu");
    let bad = dir.path().join("bad.ecu");
    let other = dir.path().join("other.ecu");
    fs::write(&good, SAMPLE_ECU).unwrap();
    fs::write(&bad, "<root>").unwrap();
    fs::write(&other, "<root><x>1</x></root>").unwrap();

    let converter = Converter::new();
    let outcomes: Vec<_> = converter
        .batch(vec![good.clone(), bad.clone(), other.clone()], ConversionMode::CsvOnly)
        .collect();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].input, good);
    assert!(outcomes[0].is_ok());
    assert!(!outcomes[1].is_ok());
    assert!(outcomes[2].is_ok());
    assert_eq!(fs::read_to_string(dir.path().join("other.csv")).unwrap(), "x,1");
}

#[test]
fn test_batch_is_lazy() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.ecu");
    let second = dir.path().join("second.ecu");
    fs::write(&first, SAMPLE_ECU).unwrap();
    fs::write(&second, SAMPLE_ECU).unwrap();

    let converter = Converter::new();
    let mut batch = converter.batch([first, second], ConversionMode::CsvOnly);
    assert_eq!(batch.mode(), ConversionMode::CsvOnly);

    batch.next().unwrap();
    assert!(dir.path().join("first.csv").exists());
    assert!(!dir.path().join("second.csv").exists());
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_matches_sequential() {
    let dir = tempdir().unwrap();
    let paths: Vec<_> = (0..8)
        .map(|i| {
            let path = dir.path().join(format!("run{}.ecu", i));
            let xml = format!("<r><n>{}</n><s name=\"c\" value=\"{}\"/></r>", i, i);
            fs::write(&path, xml).unwrap();
            path
        })
        .collect();

    let outcomes = Converter::new().convert_all_parallel(&paths, ConversionMode::CsvOnly);

    assert_eq!(outcomes.len(), paths.len());
    for (i, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.input, paths[i]);
        let csv = fs::read_to_string(dir.path().join(format!("run{}.csv", i))).unwrap();
        assert_eq!(csv, format!("n,{}\rc,{}", i, i));
    }
}
