//! Conversion report: what a run produced, what it skipped and what looked
//! suspicious.
//!
//! The report sits beside the COCO document and never changes it. Skipped
//! label files and out-of-range category ids are recorded here even though
//! the conversion itself tolerates both.

use serde::Serialize;
use std::fmt;

/// A report generated by one conversion run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ConversionReport {
    /// Label directory that was scanned.
    pub labels_dir: String,
    /// Image directory that was probed.
    pub images_dir: String,
    /// Output file, once the document has been written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub counts: ConversionCounts,
    /// Label files left out because their image could not be read.
    pub skipped: Vec<SkippedLabel>,
    pub issues: Vec<ConversionIssue>,
}

impl ConversionReport {
    pub fn new(labels_dir: impl Into<String>, images_dir: impl Into<String>) -> Self {
        Self {
            labels_dir: labels_dir.into(),
            images_dir: images_dir.into(),
            ..Default::default()
        }
    }

    /// Add an issue to the report.
    pub fn add(&mut self, issue: ConversionIssue) {
        self.issues.push(issue);
    }

    /// Records a skipped label file together with an info note.
    pub fn add_skipped(&mut self, skipped: SkippedLabel) {
        self.add(ConversionIssue::info(
            ConversionIssueCode::ImageUnreadable,
            format!("skipped {}: {}", skipped.label_file, skipped.reason),
        ));
        self.skipped.push(skipped);
    }

    pub fn warning_count(&self) -> usize {
        self.count(ConversionSeverity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(ConversionSeverity::Info)
    }

    fn count(&self, severity: ConversionSeverity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  {} label file(s): {} images, {} annotations, {} categories",
            self.counts.label_files,
            self.counts.images,
            self.counts.annotations,
            self.counts.categories
        )?;

        if !self.skipped.is_empty() {
            writeln!(f, "  skipped {} label file(s)", self.skipped.len())?;
        }

        for (severity, title) in [
            (ConversionSeverity::Warning, "Warnings"),
            (ConversionSeverity::Info, "Notes"),
        ] {
            let count = self.count(severity);
            if count == 0 {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "{} ({}):", title, count)?;
            for issue in self.issues.iter().filter(|i| i.severity == severity) {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        Ok(())
    }
}

/// Counts of what a run saw and emitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConversionCounts {
    pub label_files: usize,
    pub images: usize,
    pub annotations: usize,
    pub categories: usize,
}

/// A label file that produced no records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedLabel {
    pub label_file: String,
    pub image_path: String,
    pub reason: String,
}

/// A single issue noticed during conversion.
#[derive(Clone, Debug, Serialize)]
pub struct ConversionIssue {
    pub severity: ConversionSeverity,
    pub code: ConversionIssueCode,
    pub message: String,
}

impl ConversionIssue {
    /// Create a warning-level issue.
    pub fn warning(code: ConversionIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ConversionSeverity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Create an info-level issue.
    pub fn info(code: ConversionIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ConversionSeverity::Info,
            code,
            message: message.into(),
        }
    }
}

/// Severity level for conversion issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionSeverity {
    /// The output references something it does not define.
    Warning,
    /// A policy decision was applied; the output is consistent.
    Info,
}

/// Stable issue codes for programmatic consumption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionIssueCode {
    /// A label file was skipped because its image is missing or unreadable.
    ImageUnreadable,
    /// Annotations reference a category id with no category record.
    CategoryOutOfRange,
}
