//! Per-file completion report for batch conversions

use std::fmt;
use std::path::PathBuf;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::convert::{ConversionMode, ConversionOutcome, FileOutcome};

/// What happened to one file
#[derive(Debug, Clone)]
pub enum EntryStatus {
    /// Output written to the given path
    Converted(PathBuf),
    /// Left alone on purpose
    Skipped(String),
    /// Conversion failed
    Failed(String),
}

/// One line of the report
#[derive(Debug, Clone)]
pub struct ReportEntry {
    /// Input path
    pub input: PathBuf,
    /// Result for this input
    pub status: EntryStatus,
}

impl From<&FileOutcome> for ReportEntry {
    fn from(outcome: &FileOutcome) -> Self {
        let status = match &outcome.result {
            Ok(ConversionOutcome::Written { output, .. }) => EntryStatus::Converted(output.clone()),
            Ok(ConversionOutcome::Skipped { reason }) => EntryStatus::Skipped(reason.clone()),
            Err(err) => EntryStatus::Failed(err.to_string()),
        };
        Self {
            input: outcome.input.clone(),
            status,
        }
    }
}

/// Report over a whole batch
#[derive(Debug)]
pub struct BatchReport {
    /// Mode the batch ran in
    pub mode: ConversionMode,
    /// Entries in completion order
    pub entries: Vec<ReportEntry>,
}

impl BatchReport {
    /// Create an empty report
    pub fn new(mode: ConversionMode) -> Self {
        Self {
            mode,
            entries: Vec::new(),
        }
    }

    /// Record one file outcome
    pub fn add(&mut self, outcome: &FileOutcome) {
        self.entries.push(ReportEntry::from(outcome));
    }

    /// Number of converted files
    pub fn converted_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, EntryStatus::Converted(_)))
            .count()
    }

    /// Number of skipped files
    pub fn skipped_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, EntryStatus::Skipped(_)))
            .count()
    }

    /// Number of failed files
    pub fn failure_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, EntryStatus::Failed(_)))
            .count()
    }

    /// Check if any file failed
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static SKIP: Emoji<'_, '_> = Emoji("⚠", "[SKIP]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut output = String::new();
            for entry in &self.entries {
                let name = file_label(&entry.input);
                match &entry.status {
                    EntryStatus::Converted(out) => {
                        output.push_str(&format!(
                            "[{}] {} -> {}\n",
                            OK,
                            style(name).green(),
                            out.display()
                        ));
                    }
                    EntryStatus::Skipped(reason) => {
                        output.push_str(&format!(
                            "[{}] {} - {}: {}\n",
                            SKIP,
                            style(name).yellow(),
                            style("SKIPPED").yellow().bold(),
                            reason
                        ));
                    }
                    EntryStatus::Failed(msg) => {
                        output.push_str(&format!(
                            "[{}] {} - {}: {}\n",
                            FAIL,
                            style(name).red(),
                            style("FAILED").red().bold(),
                            msg
                        ));
                    }
                }
            }

            output.push_str(&format!(
                "\n{} ({}): {} converted, {} skipped, {} failed\n",
                style("Summary").bold(),
                self.mode,
                style(self.converted_count()).green(),
                style(self.skipped_count()).yellow(),
                style(self.failure_count()).red()
            ));
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            let name = file_label(&entry.input);
            match &entry.status {
                EntryStatus::Converted(out) => writeln!(f, "[OK] {} -> {}", name, out.display())?,
                EntryStatus::Skipped(reason) => {
                    writeln!(f, "[SKIP] {} - SKIPPED: {}", name, reason)?
                }
                EntryStatus::Failed(msg) => writeln!(f, "[FAIL] {} - FAILED: {}", name, msg)?,
            }
        }
        writeln!(f)?;
        writeln!(
            f,
            "Summary ({}): {} converted, {} skipped, {} failed",
            self.mode,
            self.converted_count(),
            self.skipped_count(),
            self.failure_count()
        )
    }
}

// Last path component, as the file list shows it
fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ContainerError;
    use crate::convert::{ConversionError, ConversionStats};

    fn outcome(input: &str, result: Result<ConversionOutcome, ConversionError>) -> FileOutcome {
        FileOutcome {
            input: PathBuf::from(input),
            result,
        }
    }

    #[test]
    fn test_report_counts() {
        let mut report = BatchReport::new(ConversionMode::Decompress);
        report.add(&outcome(
            "/logs/a.cmp",
            Ok(ConversionOutcome::Written {
                output: PathBuf::from("/logs/a.csv"),
                stats: ConversionStats::default(),
            }),
        ));
        report.add(&outcome(
            "/logs/b.cmp",
            Ok(ConversionOutcome::Skipped {
                reason: "no trailer".to_string(),
            }),
        ));
        report.add(&outcome(
            "/logs/c.cmp",
            Err(ContainerError::InvalidDeclaredSize("x".to_string()).into()),
        ));

        assert_eq!(report.converted_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.failure_count(), 1);
        assert!(report.has_failures());

        let text = report.to_string();
        assert!(text.contains("[OK] a.cmp -> /logs/a.csv"));
        assert!(text.contains("[SKIP] b.cmp"));
        assert!(text.contains("[FAIL] c.cmp"));
        assert!(text.contains("Summary (decompress): 1 converted, 1 skipped, 1 failed"));
    }

    #[test]
    fn test_empty_report() {
        let report = BatchReport::new(ConversionMode::CsvOnly);
        assert!(!report.has_failures());
        assert!(report.format_colored().contains("converted"));
    }
}
