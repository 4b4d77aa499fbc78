use anyhow::{Context, Result};
use std::path::PathBuf;

use ecucsv::container::{self, Trailer};
use ecucsv::convert::CONTAINER_EXTENSION;
use ecucsv::serialize::CsvSummary;

/// Display information about a container or CSV blob
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let bytes = std::fs::read(&file).context("Failed to read file")?;

    println!("ecucsv File Information");
    println!("=======================");
    println!("File: {}", file.display());
    println!("Size: {} bytes", bytes.len());
    println!();

    let is_container = file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case(CONTAINER_EXTENSION))
        .unwrap_or(false);

    let blob = if is_container {
        let trailer = Trailer::locate(&bytes)
            .context("Failed to parse size trailer")?
            .ok_or_else(|| anyhow::anyhow!("No size trailer found; file cannot be decompressed"))?;

        println!("Container:");
        println!("  Payload: {} bytes", trailer.payload_len);
        println!("  Declared CSV size: {} bytes", trailer.declared_size);
        // The trailer's NUL byte is in `bytes`, so the length is never zero
        println!(
            "  Compression ratio: {:.1}x",
            trailer.declared_size as f64 / bytes.len() as f64
        );
        println!();

        container::decompress(&bytes).context("Failed to decompress container")?
    } else {
        bytes
    };

    let summary = CsvSummary::from_blob(&blob).context("Failed to read CSV blob")?;
    println!("CSV Blob:");
    println!("  Lines: {}", summary.lines);
    println!("  Two-field lines: {}", summary.pairs);
    println!("  Widest line: {} fields", summary.widest);
    println!("  Total fields: {}", summary.fields);

    Ok(())
}
