//! # CSV Serializer
//!
//! Renders [`Records`] into the row-oriented CSV blob:
//!
//! ```text
//! key,value            one line per scalar, insertion order
//! name,v1,v2,...,vN    one line per series, first-seen order
//! ```
//!
//! Lines end in a carriage return (0x0D) and the blob has its trailing
//! whitespace trimmed. Fields are written verbatim: the ECU schema never puts
//! a comma or a line break inside a value, so nothing is quoted or escaped.

use crate::extract::Records;

/// Line terminator of the CSV blob
pub const LINE_TERMINATOR: char = '\r';

/// Field delimiter of the CSV blob
pub const FIELD_DELIMITER: char = ',';

/// Render records into the CSV blob
pub fn serialize(records: &Records) -> String {
    let mut out = String::new();

    for (key, value) in records.scalars.iter() {
        out.push_str(key);
        out.push(FIELD_DELIMITER);
        out.push_str(value);
        out.push(LINE_TERMINATOR);
    }

    for series in &records.series {
        out.push_str(&series.name);
        for value in &series.values {
            out.push(FIELD_DELIMITER);
            out.push_str(value);
        }
        out.push(LINE_TERMINATOR);
    }

    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out
}

/// Line-level summary of a CSV blob
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvSummary {
    /// Number of lines
    pub lines: usize,
    /// Lines with exactly two fields (scalars and single-value series)
    pub pairs: usize,
    /// Field count of the widest line
    pub widest: usize,
    /// Total number of fields
    pub fields: usize,
}

impl CsvSummary {
    /// Summarize a blob without re-extracting records
    pub fn from_blob(blob: &[u8]) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .terminator(csv::Terminator::Any(LINE_TERMINATOR as u8))
            .from_reader(blob);

        let mut summary = CsvSummary::default();
        for record in reader.records() {
            let record = record?;
            summary.lines += 1;
            summary.fields += record.len();
            summary.widest = summary.widest.max(record.len());
            if record.len() == 2 {
                summary.pairs += 1;
            }
        }
        Ok(summary)
    }
}
