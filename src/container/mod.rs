//! # Container Codec
//!
//! A `.cmp` container is the raw DEFLATE stream of a UTF-8 CSV blob followed
//! by a plaintext size trailer:
//!
//! ```text
//! ┌──────────────────────────┬──────┬─────────────────────────┐
//! │ raw DEFLATE payload      │ 0x00 │ ASCII decimal length    │
//! │ (no zlib/gzip wrapper)   │      │ of the uncompressed CSV │
//! └──────────────────────────┴──────┴─────────────────────────┘
//! ```
//!
//! There is no magic number, version field or length-of-length. The trailer
//! is found by scanning backward for the last NUL byte; the trailer digits
//! never contain one, so a NUL inside the payload is harmless.

use std::io::{Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use log::{debug, warn};

pub use error::ContainerError;

mod error;


/// Byte separating the payload from the size trailer
pub const TRAILER_SEPARATOR: u8 = 0x00;

/// Compression level used when none is configured
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Highest DEFLATE level accepted
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

// Upper bound on the output buffer reserved up front from an untrusted trailer
const MAX_PREALLOCATION: usize = 16 * 1024 * 1024;

/// Location and content of a container's size trailer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trailer {
    /// Length of the DEFLATE payload (offset of the separator)
    pub payload_len: usize,
    /// Declared byte length of the uncompressed CSV
    pub declared_size: usize,
}

impl Trailer {
    /// Find and parse the trailer.
    ///
    /// Returns `Ok(None)` when the container has no NUL byte at all, which
    /// means the uncompressed size is unknown.
    pub fn locate(container: &[u8]) -> Result<Option<Self>, ContainerError> {
        let Some(payload_len) = container.iter().rposition(|&b| b == TRAILER_SEPARATOR) else {
            return Ok(None);
        };

        let digits = &container[payload_len + 1..];
        let invalid =
            || ContainerError::InvalidDeclaredSize(String::from_utf8_lossy(digits).into_owned());

        if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
            return Err(invalid());
        }
        let declared_size = std::str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(invalid)?;

        Ok(Some(Self {
            payload_len,
            declared_size,
        }))
    }

    /// Render the trailer bytes for a payload of `declared_size` bytes
    pub fn encode(declared_size: usize) -> Vec<u8> {
        let digits = declared_size.to_string();
        let mut out = Vec::with_capacity(digits.len() + 1);
        out.push(TRAILER_SEPARATOR);
        out.extend_from_slice(digits.as_bytes());
        out
    }
}

/// Compress a CSV blob into a container at the default level
pub fn compress(csv: &str) -> Result<Vec<u8>, ContainerError> {
    compress_with_level(csv, DEFAULT_COMPRESSION_LEVEL)
}

/// Compress a CSV blob into a container at the given DEFLATE level (0-9)
pub fn compress_with_level(csv: &str, level: u32) -> Result<Vec<u8>, ContainerError> {
    let level = if level > MAX_COMPRESSION_LEVEL {
        warn!(
            "Compression level {} out of range, using {}",
            level, MAX_COMPRESSION_LEVEL
        );
        MAX_COMPRESSION_LEVEL
    } else {
        level
    };

    let payload = csv.as_bytes();
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(payload)?;
    let mut container = encoder.finish()?;
    container.extend_from_slice(&Trailer::encode(payload.len()));

    debug!(
        "Packed {} bytes into {} byte container (level {})",
        payload.len(),
        container.len(),
        level
    );
    Ok(container)
}

/// Recover the exact CSV bytes stored in a container
pub fn decompress(container: &[u8]) -> Result<Vec<u8>, ContainerError> {
    let trailer = Trailer::locate(container)?.ok_or(ContainerError::MissingTrailer)?;
    let payload = &container[..trailer.payload_len];

    let mut out = Vec::with_capacity(trailer.declared_size.min(MAX_PREALLOCATION));
    DeflateDecoder::new(payload)
        .take(trailer.declared_size as u64)
        .read_to_end(&mut out)?;

    if out.len() < trailer.declared_size {
        return Err(ContainerError::Truncated {
            declared: trailer.declared_size,
            actual: out.len(),
        });
    }

    debug!(
        "Unpacked {} byte container into {} bytes",
        container.len(),
        out.len()
    );
    Ok(out)
}

/// Recover the CSV blob stored in a container as text
pub fn decompress_to_string(container: &[u8]) -> Result<String, ContainerError> {
    Ok(String::from_utf8(decompress(container)?)?)
}
