//! Flat records produced by extraction and the state machine that builds them.
//!
//! [`RecordBuilder`] holds the only mutable context of a pass: the name of the
//! most recent start tag and, while one tag's attributes are scanned, the key
//! of the series its `value` attributes belong to. It is fed events in
//! document order, so tests can drive it with synthetic sequences.

use indexmap::IndexMap;

use super::ExtractError;

/// Attribute that opens or continues a label series
pub const NAME_ATTRIBUTE: &str = "name";
/// Attribute whose content is appended to the current label series
pub const VALUE_ATTRIBUTE: &str = "value";

/// Element name → last non-empty text content seen for that element.
///
/// Overwriting a key keeps the position of its first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScalarMap {
    entries: IndexMap<String, String>,
}

impl ScalarMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `key`, replacing any earlier value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up the value recorded for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A named, ordered sequence of `value` attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Series {
    /// Content of the `name` attribute that opened the series
    pub name: String,
    /// `value` attributes in encounter order
    pub values: Vec<String>,
}

impl Series {
    /// Create an empty series
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }
}

/// Label series in first-seen order of their names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSeries {
    series: Vec<Series>,
    positions: IndexMap<String, usize>,
}

impl LabelSeries {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the series called `name`, appending a new empty one if it has
    /// not been seen before. Returns true if a series was created.
    pub fn open(&mut self, name: &str) -> bool {
        if self.positions.contains_key(name) {
            return false;
        }
        self.positions.insert(name.to_string(), self.series.len());
        self.series.push(Series::new(name));
        true
    }

    /// Append `value` to the series called `name`.
    ///
    /// Returns false when no such series exists.
    pub fn push_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.positions.get(name) {
            Some(&idx) => {
                self.series[idx].values.push(value.into());
                true
            }
            None => false,
        }
    }

    /// Look up a series by name
    pub fn get(&self, name: &str) -> Option<&Series> {
        self.positions.get(name).map(|&idx| &self.series[idx])
    }

    /// Number of distinct series
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// True if no series has been opened
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total number of values across all series
    pub fn value_count(&self) -> usize {
        self.series.iter().map(|s| s.values.len()).sum()
    }

    /// Series in first-seen order
    pub fn iter(&self) -> std::slice::Iter<'_, Series> {
        self.series.iter()
    }
}

impl<'a> IntoIterator for &'a LabelSeries {
    type Item = &'a Series;
    type IntoIter = std::slice::Iter<'a, Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.iter()
    }
}

/// Everything extracted from one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Records {
    /// Scalar key/value pairs from element text
    pub scalars: ScalarMap,
    /// Named series from `name`/`value` attributes
    pub series: LabelSeries,
}

/// Event-driven builder for [`Records`]
#[derive(Debug, Default)]
pub struct RecordBuilder {
    records: Records,
    current_element: String,
}

impl RecordBuilder {
    /// Create a builder with no context
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the most recently started element (empty before the first)
    pub fn current_element(&self) -> &str {
        &self.current_element
    }

    /// Feed a start tag (or self-closing tag) with its attributes in
    /// document order.
    pub fn start_element<I, K, V>(
        &mut self,
        name: &str,
        attributes: I,
    ) -> Result<(), ExtractError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.current_element.clear();
        self.current_element.push_str(name);

        // Scoped to this tag: a value never lands in a series named on another element
        let mut series_key: Option<String> = None;
        for (key, value) in attributes {
            match key.as_ref() {
                NAME_ATTRIBUTE => {
                    let value = value.into();
                    self.records.series.open(&value);
                    series_key = Some(value);
                }
                VALUE_ATTRIBUTE => {
                    let value = value.into();
                    match series_key.as_deref() {
                        Some(key) => {
                            self.records.series.push_value(key, value);
                        }
                        None => {
                            return Err(ExtractError::OrphanValue {
                                element: name.to_string(),
                                value,
                            })
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Feed character data. Empty text does not overwrite anything.
    pub fn text(&mut self, content: &str) {
        if content.is_empty() {
            return;
        }
        self.records
            .scalars
            .insert(self.current_element.as_str(), content);
    }

    /// Finish the pass and hand out the records
    pub fn finish(self) -> Records {
        self.records
    }
}
