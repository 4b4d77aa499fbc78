use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ecucsv::convert::ConversionMode;

mod config;
mod convert;
mod info;
mod profile;

pub use profile::Profile;

/// ecucsv - ECU telemetry to compact CSV converter
#[derive(Parser)]
#[command(name = "ecucsv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Compression profile for trading speed against container size.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ProfileArg {
    /// Prioritize speed over size
    Fast,
    /// Balance between speed and size
    #[default]
    Balanced,
    /// Smallest containers, slower compression
    MaxCompression,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Fast => Profile::Fast,
            ProfileArg::Balanced => Profile::Balanced,
            ProfileArg::MaxCompression => Profile::MaxCompression,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert ECU files to plain CSV
    Csv {
        /// Input ECU file paths
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Convert files in parallel (requires the parallel feature)
        #[arg(long)]
        parallel: bool,
    },

    /// Convert ECU files to compressed .cmp containers
    Compress {
        /// Input ECU file paths
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Compression profile (fast, balanced, max-compression)
        #[arg(short = 'p', long, value_enum)]
        profile: Option<ProfileArg>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Convert files in parallel (requires the parallel feature)
        #[arg(long)]
        parallel: bool,

        // === Advanced tuning flags (hidden from --help) ===
        /// DEFLATE level (0-9, default: profile-dependent)
        #[arg(short = 'c', long, hide = true)]
        compression_level: Option<u32>,
    },

    /// Restore .cmp containers to plain CSV
    Decompress {
        /// Input .cmp file paths
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Convert files in parallel (requires the parallel feature)
        #[arg(long)]
        parallel: bool,
    },

    /// Display information about a .cmp container or .csv blob
    Info {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Csv {
            inputs,
            config,
            parallel,
        } => convert::run(
            ConversionMode::CsvOnly,
            inputs,
            convert::Options {
                config,
                parallel,
                ..Default::default()
            },
        ),
        Commands::Compress {
            inputs,
            profile,
            config,
            parallel,
            compression_level,
        } => convert::run(
            ConversionMode::Compress,
            inputs,
            convert::Options {
                profile: profile.map(Profile::from),
                config,
                parallel,
                compression_level,
            },
        ),
        Commands::Decompress { inputs, parallel } => convert::run(
            ConversionMode::Decompress,
            inputs,
            convert::Options {
                parallel,
                ..Default::default()
            },
        ),
        Commands::Info { file } => info::run(file),
    }
}
