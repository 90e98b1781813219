//! Per-file outcomes and the run-level summary of a challenge download.

use std::path::PathBuf;

use crate::download::TransferKind;

/// What happened to one manifest file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Transferred in this run.
    Downloaded {
        /// Local target path.
        path: PathBuf,
        /// Whether the transfer started fresh or resumed.
        kind: TransferKind,
    },
    /// Already on disk with the expected size; no request was made.
    Skipped {
        /// Local target path.
        path: PathBuf,
    },
    /// Not completed in this run.
    Failed {
        /// Local target path (or the intended one).
        path: PathBuf,
        /// Human-readable reason.
        reason: String,
    },
}

impl FileOutcome {
    /// Returns true for [`FileOutcome::Failed`].
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Outcome of a whole challenge download.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of one file.
    pub fn record(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    /// All outcomes in processing order.
    #[must_use]
    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    /// Number of files that failed.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    /// Reasons for each failed file, in processing order.
    #[must_use]
    pub fn failures(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                FileOutcome::Failed { reason, .. } => Some(reason.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of files transferred in this run.
    #[must_use]
    pub fn downloaded_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Downloaded { .. }))
            .count()
    }

    /// Number of files skipped because they were already complete.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Skipped { .. }))
            .count()
    }

    /// Returns true when no file failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts_each_outcome_kind() {
        let mut report = BatchReport::new();
        report.record(FileOutcome::Skipped {
            path: PathBuf::from("a/one.zip"),
        });
        report.record(FileOutcome::Downloaded {
            path: PathBuf::from("a/two.zip"),
            kind: TransferKind::Resume,
        });
        report.record(FileOutcome::Failed {
            path: PathBuf::from("b/three.zip"),
            reason: "HTTP 404 downloading https://example.com/three.zip".to_string(),
        });

        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.downloaded_count(), 1);
        assert_eq!(report.error_count(), 1);
        assert_eq!(
            report.failures(),
            vec!["HTTP 404 downloading https://example.com/three.zip"]
        );
        assert!(!report.is_success());
    }

    #[test]
    fn test_empty_report_is_success() {
        assert!(BatchReport::new().is_success());
    }
}
