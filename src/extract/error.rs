use std::sync::Arc;

/// Errors that can occur while extracting records from an ECU XML document
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Error parsing XML
    #[error("XML parsing error: {0}")]
    XmlError(quick_xml::Error),

    /// I/O error while reading the document
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// UTF-8 encoding error in an element name or attribute
    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    /// The document ended before every element was closed
    #[error("Unexpected end of document: {0} element(s) left open")]
    UnclosedElements(usize),

    /// The document contains no element at all
    #[error("Document has no root element")]
    MissingRoot,

    /// A second top-level element follows the root element
    #[error("Document has more than one root element")]
    MultipleRoots,

    /// Character data found outside the root element
    #[error("Text outside of the root element: {0:?}")]
    TextOutsideRoot(String),

    /// A `value` attribute appeared before any `name` attribute on its element
    #[error("Attribute value={value:?} on <{element}> has no preceding name attribute")]
    OrphanValue {
        /// Element carrying the attribute
        element: String,
        /// The orphaned attribute value
        value: String,
    },
}

impl ExtractError {
    /// True for every failure caused by the document content rather than by
    /// reading it.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, ExtractError::IoError(_))
    }
}

impl From<quick_xml::Error> for ExtractError {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            // quick-xml wraps reader failures; keep them classified as I/O
            quick_xml::Error::Io(io) => ExtractError::IoError(unwrap_io(io)),
            other => ExtractError::XmlError(other),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for ExtractError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        ExtractError::XmlError(quick_xml::Error::from(err))
    }
}

fn unwrap_io(io: Arc<std::io::Error>) -> std::io::Error {
    Arc::try_unwrap(io)
        .unwrap_or_else(|shared| std::io::Error::new(shared.kind(), shared.to_string()))
}
