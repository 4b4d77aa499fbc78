//! # Conversion Orchestrator
//!
//! Sequences extraction, serialization and the container codec for one file
//! at a time, and does the file system reads and writes.
//!
//! | Mode         | Input    | Pipeline                                  | Output     |
//! |--------------|----------|-------------------------------------------|------------|
//! | `CsvOnly`    | `*.ecu`  | extract → serialize                       | `<base>.csv` |
//! | `Compress`   | `*.ecu`  | extract → serialize → container compress  | `<base>.cmp` |
//! | `Decompress` | `*.cmp`  | container decompress                      | `<base>.csv` |
//!
//! `<base>` is the input path up to its first `.`, so `a.b.ecu` becomes
//! `a.csv`. A dot in a directory name cuts the path there too:
//! `/data/v1.2/run.ecu` becomes `/data/v1.csv`. Existing outputs are replaced.
//!
//! A container without any size trailer is not an error: decompression
//! reports [`ConversionOutcome::Skipped`] and writes nothing.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info, warn};

use crate::container;
use crate::extract::{RecordExtractor, Records, DEFAULT_INPUT_BUFFER_SIZE};
use crate::serialize::serialize;

pub use batch::{Batch, FileOutcome};
pub use error::{ConversionError, FailureKind};

mod batch;
mod error;

#[cfg(test)]
mod tests;

/// Extension of plain CSV outputs
pub const CSV_EXTENSION: &str = "csv";
/// Extension of compressed container outputs
pub const CONTAINER_EXTENSION: &str = "cmp";
/// Extension of ECU source documents
pub const SOURCE_EXTENSION: &str = "ecu";

/// What to do with an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionMode {
    /// ECU document to plain CSV
    CsvOnly,
    /// ECU document to compressed container
    Compress,
    /// Compressed container back to plain CSV
    Decompress,
}

impl ConversionMode {
    /// Extension given to the output file
    pub fn output_extension(&self) -> &'static str {
        match self {
            ConversionMode::CsvOnly | ConversionMode::Decompress => CSV_EXTENSION,
            ConversionMode::Compress => CONTAINER_EXTENSION,
        }
    }

    /// Extension inputs of this mode normally carry
    pub fn input_extension(&self) -> &'static str {
        match self {
            ConversionMode::CsvOnly | ConversionMode::Compress => SOURCE_EXTENSION,
            ConversionMode::Decompress => CONTAINER_EXTENSION,
        }
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionMode::CsvOnly => write!(f, "csv-only"),
            ConversionMode::Compress => write!(f, "compress"),
            ConversionMode::Decompress => write!(f, "decompress"),
        }
    }
}

impl FromStr for ConversionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv-only" | "csv" => Ok(ConversionMode::CsvOnly),
            "compress" => Ok(ConversionMode::Compress),
            "decompress" => Ok(ConversionMode::Decompress),
            _ => Err(format!(
                "Unknown mode '{}'. Valid options: csv-only, compress, decompress",
                s
            )),
        }
    }
}

/// Configuration for the orchestrator
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// DEFLATE level for containers (0-9)
    pub compression_level: u32,

    /// Read buffer size for ECU documents
    pub buffer_size: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            compression_level: container::DEFAULT_COMPRESSION_LEVEL,
            buffer_size: DEFAULT_INPUT_BUFFER_SIZE,
        }
    }
}

impl ConversionConfig {
    /// Smallest containers, slowest compression
    pub fn max_compression() -> Self {
        Self {
            compression_level: container::MAX_COMPRESSION_LEVEL,
            ..Self::default()
        }
    }

    /// Fastest compression, larger containers
    pub fn fast_write() -> Self {
        Self {
            compression_level: 1,
            ..Self::default()
        }
    }
}

/// Statistics from converting one file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionStats {
    /// Scalar records extracted (zero when decompressing)
    pub scalar_count: usize,
    /// Label series extracted (zero when decompressing)
    pub series_count: usize,
    /// Series values extracted (zero when decompressing)
    pub value_count: usize,
    /// Size of the input file
    pub input_bytes: u64,
    /// Size of the CSV blob
    pub csv_bytes: u64,
    /// Size of the written output file
    pub output_bytes: u64,
    /// CSV bytes per container byte, zero when no container is involved
    pub compression_ratio: f64,
}

impl ConversionStats {
    fn from_records(records: &Records) -> Self {
        Self {
            scalar_count: records.scalars.len(),
            series_count: records.series.len(),
            value_count: records.series.value_count(),
            ..Default::default()
        }
    }
}

/// Result of converting one file
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    /// An output file was written
    Written {
        /// Path of the written file
        output: PathBuf,
        /// Conversion statistics
        stats: ConversionStats,
    },
    /// Nothing was written
    Skipped {
        /// Why the file was left alone
        reason: String,
    },
}

impl ConversionOutcome {
    /// Path of the written file, if any
    pub fn output(&self) -> Option<&Path> {
        match self {
            ConversionOutcome::Written { output, .. } => Some(output),
            ConversionOutcome::Skipped { .. } => None,
        }
    }
}

/// Derive the output path for `input` with a new extension.
///
/// The whole path is cut at its first `.` and the extension appended, so
/// names with several dots lose the middle parts (`a.b.ecu` → `a.csv`) and a
/// dotted directory truncates the path inside that directory
/// (`/data/v1.2/run.ecu` → `/data/v1.csv`). Existing `.cmp` files were named
/// this way, so the rule stays as is.
pub fn output_path<P: AsRef<Path>>(input: P, extension: &str) -> PathBuf {
    let input = input.as_ref().to_string_lossy();
    let base = input.split('.').next().unwrap_or_default();
    PathBuf::from(format!("{}.{}", base, extension))
}

/// Converts ECU documents and containers, one file per call
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConversionConfig,
}

impl Converter {
    /// Create a converter with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom configuration
    pub fn with_config(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert one file in the given mode
    pub fn convert<P: AsRef<Path>>(
        &self,
        input: P,
        mode: ConversionMode,
    ) -> Result<ConversionOutcome, ConversionError> {
        let input = input.as_ref();
        debug!("{} {}", mode, input.display());
        match mode {
            ConversionMode::CsvOnly => self.csv_only(input),
            ConversionMode::Compress => self.compress(input),
            ConversionMode::Decompress => self.decompress(input),
        }
    }

    /// Extract an ECU document and write it as `<base>.csv`
    pub fn csv_only<P: AsRef<Path>>(&self, input: P) -> Result<ConversionOutcome, ConversionError> {
        let input = input.as_ref();
        let (records, input_bytes) = self.extract(input)?;
        let csv = serialize(&records);

        let output = derive_output(input, CSV_EXTENSION);
        write_output(&output, csv.as_bytes())?;

        let stats = ConversionStats {
            input_bytes,
            csv_bytes: csv.len() as u64,
            output_bytes: csv.len() as u64,
            ..ConversionStats::from_records(&records)
        };
        info!("{} -> {}", input.display(), output.display());
        Ok(ConversionOutcome::Written { output, stats })
    }

    /// Extract an ECU document and write it as a `<base>.cmp` container
    pub fn compress<P: AsRef<Path>>(&self, input: P) -> Result<ConversionOutcome, ConversionError> {
        let input = input.as_ref();
        let (records, input_bytes) = self.extract(input)?;
        let csv = serialize(&records);
        let packed = container::compress_with_level(&csv, self.config.compression_level)
            .map_err(|e| encode_error(input, e))?;

        let output = derive_output(input, CONTAINER_EXTENSION);
        write_output(&output, &packed)?;

        let stats = ConversionStats {
            input_bytes,
            csv_bytes: csv.len() as u64,
            output_bytes: packed.len() as u64,
            compression_ratio: ratio(csv.len(), packed.len()),
            ..ConversionStats::from_records(&records)
        };
        info!(
            "{} -> {} ({:.1}x)",
            input.display(),
            output.display(),
            stats.compression_ratio
        );
        Ok(ConversionOutcome::Written { output, stats })
    }

    /// Unpack a `.cmp` container and write the recovered bytes as `<base>.csv`
    pub fn decompress<P: AsRef<Path>>(
        &self,
        input: P,
    ) -> Result<ConversionOutcome, ConversionError> {
        let input = input.as_ref();
        let packed = std::fs::read(input).map_err(|e| ConversionError::io(input, e))?;

        let csv = match container::decompress(&packed) {
            Ok(csv) => csv,
            Err(err) if err.is_missing_trailer() => {
                warn!("Skipping {}: {}", input.display(), err);
                return Ok(ConversionOutcome::Skipped {
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        let output = derive_output(input, CSV_EXTENSION);
        write_output(&output, &csv)?;

        let stats = ConversionStats {
            input_bytes: packed.len() as u64,
            csv_bytes: csv.len() as u64,
            output_bytes: csv.len() as u64,
            compression_ratio: ratio(csv.len(), packed.len()),
            ..Default::default()
        };
        info!("{} -> {}", input.display(), output.display());
        Ok(ConversionOutcome::Written { output, stats })
    }

    /// Lazily convert `paths` in order, one outcome per path.
    ///
    /// A failing file is reported and the batch moves on to the next one.
    pub fn batch<I>(&self, paths: I, mode: ConversionMode) -> Batch<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
    {
        Batch::new(self, paths.into_iter(), mode)
    }

    /// Convert independent files on the rayon pool.
    ///
    /// Outcomes come back in input order and each output is identical to
    /// what [`Converter::convert`] writes for the same file.
    #[cfg(feature = "parallel")]
    pub fn convert_all_parallel<P>(&self, paths: &[P], mode: ConversionMode) -> Vec<FileOutcome>
    where
        P: AsRef<Path> + Sync,
    {
        use rayon::prelude::*;

        paths
            .par_iter()
            .map(|path| FileOutcome::new(path.as_ref().to_path_buf(), self.convert(path, mode)))
            .collect()
    }

    fn extract(&self, input: &Path) -> Result<(Records, u64), ConversionError> {
        let input_bytes = std::fs::metadata(input)
            .map_err(|e| ConversionError::io(input, e))?
            .len();
        let records = RecordExtractor::open_with_buffer_size(input, self.config.buffer_size)
            .and_then(|extractor| extractor.extract())
            .map_err(|e| ConversionError::from_extract(input, e))?;
        Ok((records, input_bytes))
    }
}

fn derive_output(input: &Path, extension: &str) -> PathBuf {
    let output = output_path(input, extension);
    if output.parent() != input.parent() {
        warn!(
            "{} has a dot before its file name; writing {}",
            input.display(),
            output.display()
        );
    }
    output
}

// Encoding into a Vec cannot hit a short write; what is left is an encoder
// failure on our side, not a damaged input
fn encode_error(input: &Path, err: container::ContainerError) -> ConversionError {
    ConversionError::io(input, io::Error::new(io::ErrorKind::Other, err))
}

fn write_output(output: &Path, bytes: &[u8]) -> Result<(), ConversionError> {
    std::fs::write(output, bytes).map_err(|e| ConversionError::io(output, e))
}

fn ratio(uncompressed: usize, compressed: usize) -> f64 {
    if compressed == 0 {
        0.0
    } else {
        uncompressed as f64 / compressed as f64
    }
}
