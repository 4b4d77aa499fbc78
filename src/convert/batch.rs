use std::path::PathBuf;

use log::warn;

use super::{ConversionError, ConversionMode, ConversionOutcome, Converter};

/// Outcome of one file in a batch
#[derive(Debug)]
pub struct FileOutcome {
    /// Input path as given
    pub input: PathBuf,
    /// What happened to it
    pub result: Result<ConversionOutcome, ConversionError>,
}

impl FileOutcome {
    pub(super) fn new(input: PathBuf, result: Result<ConversionOutcome, ConversionError>) -> Self {
        if let Err(ref err) = result {
            warn!("Failed to convert {}: {}", input.display(), err);
        }
        Self { input, result }
    }

    /// True if the file was converted or deliberately skipped
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Lazy, single-pass iterator over a batch conversion.
///
/// Each call to `next` converts exactly one file; dropping the iterator
/// leaves the remaining files untouched. Restart by calling
/// [`Converter::batch`] again with a fresh list.
pub struct Batch<'a, I> {
    converter: &'a Converter,
    paths: I,
    mode: ConversionMode,
}

impl<'a, I> Batch<'a, I> {
    pub(super) fn new(converter: &'a Converter, paths: I, mode: ConversionMode) -> Self {
        Self {
            converter,
            paths,
            mode,
        }
    }

    /// Mode every file in the batch is converted with
    pub fn mode(&self) -> ConversionMode {
        self.mode
    }
}

impl<'a, I> Iterator for Batch<'a, I>
where
    I: Iterator,
    I::Item: Into<PathBuf>,
{
    type Item = FileOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        let input: PathBuf = self.paths.next()?.into();
        let result = self.converter.convert(&input, self.mode);
        Some(FileOutcome::new(input, result))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.paths.size_hint()
    }
}
