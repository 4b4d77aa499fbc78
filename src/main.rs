//! # ecucsv Converter
//!
//! A command-line tool for flattening ECU XML telemetry into compact CSV.
//!
//! ## Usage
//!
//! ```bash
//! # ECU to plain CSV
//! ecucsv csv run1.ecu run2.ecu
//!
//! # ECU to compressed container
//! ecucsv compress -p max-compression logs/*.ecu
//!
//! # Container back to CSV
//! ecucsv decompress logs/*.cmp
//!
//! # Inspect a container
//! ecucsv info logs/run1.cmp
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
