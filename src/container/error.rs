/// Errors that can occur while packing or unpacking a `.cmp` container
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// No NUL byte anywhere in the container, so the size is unknown
    #[error("No size trailer found (no NUL byte in container)")]
    MissingTrailer,

    /// The bytes after the last NUL are not a decimal byte count
    #[error("Invalid declared size in trailer: {0:?}")]
    InvalidDeclaredSize(String),

    /// The DEFLATE payload ended before the declared size was reached
    #[error("Truncated payload: declared {declared} bytes, recovered {actual}")]
    Truncated {
        /// Size recorded in the trailer
        declared: usize,
        /// Bytes the payload actually produced
        actual: usize,
    },

    /// DEFLATE compression or decompression failed
    #[error("DEFLATE error: {0}")]
    DeflateError(#[from] std::io::Error),

    /// The recovered payload is not valid UTF-8 text
    #[error("Recovered payload is not UTF-8: {0}")]
    NotUtf8(#[from] std::string::FromUtf8Error),
}

impl ContainerError {
    /// True when the container carries no trailer at all
    pub fn is_missing_trailer(&self) -> bool {
        matches!(self, ContainerError::MissingTrailer)
    }
}
