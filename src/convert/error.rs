use std::path::PathBuf;

use crate::container::ContainerError;
use crate::extract::ExtractError;

/// Errors that abort the conversion of a single file
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Reading the input or writing the output failed
    #[error("I/O error on {}: {source}", .path.display())]
    IoError {
        /// File that could not be read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The input is not a well-formed ECU document
    #[error("Malformed XML: {0}")]
    MalformedXml(ExtractError),

    /// The input is not a recoverable container
    #[error("Corrupt container: {0}")]
    CorruptContainer(#[from] ContainerError),
}

/// Coarse classification of a [`ConversionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// File system failure
    Io,
    /// Input document is not well-formed
    MalformedXml,
    /// Container trailer or payload is unusable
    CorruptContainer,
}

impl ConversionError {
    /// Classify the failure
    pub fn kind(&self) -> FailureKind {
        match self {
            ConversionError::IoError { .. } => FailureKind::Io,
            ConversionError::MalformedXml(_) => FailureKind::MalformedXml,
            ConversionError::CorruptContainer(_) => FailureKind::CorruptContainer,
        }
    }

    pub(super) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConversionError::IoError {
            path: path.into(),
            source,
        }
    }

    pub(super) fn from_extract(path: impl Into<PathBuf>, err: ExtractError) -> Self {
        match err {
            ExtractError::IoError(source) => Self::io(path, source),
            other => ConversionError::MalformedXml(other),
        }
    }
}
