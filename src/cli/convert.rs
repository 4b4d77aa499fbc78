use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use ecucsv::convert::{ConversionConfig, ConversionMode, Converter, FileOutcome};
use ecucsv::report::BatchReport;

use super::config::Config;
use super::Profile;

/// Flags shared by the conversion commands
#[derive(Debug, Default)]
pub struct Options {
    pub profile: Option<Profile>,
    pub config: Option<PathBuf>,
    pub parallel: bool,
    pub compression_level: Option<u32>,
}

/// Run one conversion mode over every input and print a per-file report
pub fn run(mode: ConversionMode, inputs: Vec<PathBuf>, options: Options) -> Result<()> {
    let file_config = match &options.config {
        Some(path) => Config::from_file(path)?.conversion,
        None => Default::default(),
    };

    let profile = match (options.profile, file_config.profile.as_deref()) {
        (Some(profile), _) => profile,
        (None, Some(name)) => name
            .parse::<Profile>()
            .map_err(anyhow::Error::msg)
            .context("Invalid profile in config file")?,
        (None, None) => Profile::default(),
    };

    let mut config = ConversionConfig {
        compression_level: profile.compression_level(),
        ..ConversionConfig::default()
    };
    if let Some(level) = file_config.compression_level {
        config.compression_level = level;
    }
    if let Some(size) = file_config.buffer_size {
        config.buffer_size = size;
    }
    if let Some(level) = options.compression_level {
        config.compression_level = level;
    }
    let parallel = options.parallel || file_config.parallel.unwrap_or(false);

    info!("ecucsv - {}", mode);
    info!("Files: {}", inputs.len());
    if mode == ConversionMode::Compress {
        info!("Profile: {}", profile);
        info!("Compression level: {}", config.compression_level);
    }

    let expected = mode.input_extension();
    for input in &inputs {
        let matches = input
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case(expected))
            .unwrap_or(false);
        if !matches {
            warn!("{} does not have a .{} extension", input.display(), expected);
        }
    }

    let converter = Converter::with_config(config);
    let mut report = BatchReport::new(mode);
    for outcome in convert_all(&converter, inputs, mode, parallel) {
        report.add(&outcome);
    }

    println!("{}", report.format_colored());

    if report.has_failures() {
        anyhow::bail!(
            "{} of {} file(s) failed to convert",
            report.failure_count(),
            report.entries.len()
        );
    }
    Ok(())
}

fn convert_all(
    converter: &Converter,
    inputs: Vec<PathBuf>,
    mode: ConversionMode,
    parallel: bool,
) -> Vec<FileOutcome> {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return converter.convert_all_parallel(&inputs, mode);
        }
    }
    #[cfg(not(feature = "parallel"))]
    {
        if parallel {
            warn!(
                "Parallel conversion requested but binary was built without the parallel \
                 feature; converting sequentially."
            );
        }
    }
    converter.batch(inputs, mode).collect()
}
