//! # ecucsv - ECU Telemetry to Compact CSV
//!
//! `ecucsv` flattens machine-generated ECU XML logs into a row-oriented CSV
//! blob and optionally packs that blob into a small self-describing DEFLATE
//! container. Containers unpack back to the exact CSV bytes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ecucsv::convert::{ConversionMode, Converter};
//!
//! let converter = Converter::new();
//!
//! // run.ecu -> run.cmp
//! converter.convert("logs/run.ecu", ConversionMode::Compress)?;
//!
//! // run.cmp -> run.csv
//! converter.convert("logs/run.cmp", ConversionMode::Decompress)?;
//! # Ok::<(), ecucsv::convert::ConversionError>(())
//! ```
//!
//! Working in memory:
//!
//! ```rust
//! use ecucsv::{container, extract, serialize};
//!
//! let xml = br#"<root><temp>98.6</temp><sample name="ch1" value="1"/></root>"#;
//! let records = extract::extract_bytes(xml)?;
//! let csv = serialize::serialize(&records);
//! assert_eq!(csv, "temp,98.6\rch1,1");
//!
//! let packed = container::compress(&csv)?;
//! assert_eq!(container::decompress_to_string(&packed)?, csv);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`extract`]: single-pass XML scan into scalars and label series
//! - [`serialize`]: CSV blob rendering
//! - [`container`]: raw DEFLATE container with a NUL + decimal size trailer
//! - [`convert`]: per-file orchestration, output naming, batches
//! - [`report`]: per-file completion report for batches
//!
//! ## File Formats
//!
//! | Extension | Content |
//! |-----------|---------|
//! | `.ecu` | XML telemetry document (input) |
//! | `.csv` | CR-terminated lines, `key,value` then `name,v1,...,vN`, no quoting |
//! | `.cmp` | `[raw DEFLATE][0x00][ASCII decimal uncompressed length]` |

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod container;
pub mod convert;
pub mod extract;
pub mod report;
pub mod serialize;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::container::{compress, decompress, ContainerError, Trailer};
    pub use crate::convert::{
        output_path, ConversionConfig, ConversionError, ConversionMode, ConversionOutcome,
        ConversionStats, Converter, FailureKind, FileOutcome,
    };
    pub use crate::extract::{
        extract_bytes, extract_file, ExtractError, LabelSeries, RecordExtractor, Records,
        ScalarMap, Series,
    };
    pub use crate::report::BatchReport;
    pub use crate::serialize::{serialize, CsvSummary};
}
