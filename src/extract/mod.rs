//! # Record Extractor
//!
//! Pull-parses an ECU XML document and flattens it into two kinds of records:
//!
//! - **Scalars**: the text content of an element, keyed by the element name
//!   (last occurrence wins).
//! - **Label series**: repeated elements carrying `name`/`value` attributes,
//!   grouped by `name` in first-seen order.
//!
//! ## Document Shape
//!
//! ```text
//! root
//! ├── temp            98.6         → scalar  temp,98.6
//! ├── sample name="ch1" value="1"  → series  ch1,1,...
//! ├── sample name="ch1" value="2"
//! └── sample name="ch2" value="9"  → series  ch2,9
//! ```
//!
//! The pass is a single walk over quick-xml events; no DOM is built.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;

pub use error::ExtractError;
pub use records::{
    LabelSeries, RecordBuilder, Records, ScalarMap, Series, NAME_ATTRIBUTE, VALUE_ATTRIBUTE,
};

mod error;
mod helpers;
mod records;


/// Default input buffer size for XML parsing (64KB)
pub const DEFAULT_INPUT_BUFFER_SIZE: usize = 64 * 1024;

/// Single-pass extractor over an XML source
pub struct RecordExtractor<R: BufRead> {
    reader: Reader<R>,
}

impl RecordExtractor<BufReader<File>> {
    /// Open an ECU file for extraction with default buffer size (64KB)
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        Self::open_with_buffer_size(path, DEFAULT_INPUT_BUFFER_SIZE)
    }

    /// Open an ECU file for extraction with custom buffer size
    pub fn open_with_buffer_size<P: AsRef<Path>>(
        path: P,
        buffer_size: usize,
    ) -> Result<Self, ExtractError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::with_capacity(buffer_size, file)))
    }
}

impl<'a> RecordExtractor<&'a [u8]> {
    /// Extract from an in-memory document
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<R: BufRead> RecordExtractor<R> {
    /// Create an extractor from a BufRead source
    pub fn new(reader: R) -> Self {
        // Text is kept verbatim; whitespace-only runs are dropped during the pass
        let xml_reader = Reader::from_reader(reader);
        Self { reader: xml_reader }
    }

    /// Run the pass and return the extracted records
    pub fn extract(mut self) -> Result<Records, ExtractError> {
        let mut builder = RecordBuilder::new();
        let mut depth: usize = 0;
        let mut seen_root = false;
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    if depth == 0 && seen_root {
                        return Err(ExtractError::MultipleRoots);
                    }
                    depth += 1;
                    seen_root = true;
                    let name = helpers::element_name(e)?;
                    let attrs = helpers::attributes(e, self.reader.decoder())?;
                    builder.start_element(&name, attrs)?;
                }
                Event::Empty(ref e) => {
                    if depth == 0 && seen_root {
                        return Err(ExtractError::MultipleRoots);
                    }
                    seen_root = true;
                    let name = helpers::element_name(e)?;
                    let attrs = helpers::attributes(e, self.reader.decoder())?;
                    builder.start_element(&name, attrs)?;
                }
                Event::End(_) => {
                    depth = depth.saturating_sub(1);
                }
                Event::Text(ref t) => {
                    let text = t.unescape()?;
                    if !helpers::is_xml_whitespace(&text) {
                        if depth == 0 {
                            return Err(ExtractError::TextOutsideRoot(text.into_owned()));
                        }
                        builder.text(&text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if depth > 0 {
            return Err(ExtractError::UnclosedElements(depth));
        }
        if !seen_root {
            return Err(ExtractError::MissingRoot);
        }

        let records = builder.finish();
        debug!(
            "Extracted {} scalars and {} series ({} values)",
            records.scalars.len(),
            records.series.len(),
            records.series.value_count()
        );
        Ok(records)
    }
}

/// Extract records from an ECU file on disk
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Records, ExtractError> {
    RecordExtractor::open(path)?.extract()
}

/// Extract records from an in-memory document
pub fn extract_bytes(bytes: &[u8]) -> Result<Records, ExtractError> {
    RecordExtractor::from_bytes(bytes).extract()
}
