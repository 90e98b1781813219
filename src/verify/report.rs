//! Check outcomes and the structural report they are collected into.

/// Whether a failing check stops validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Stop immediately; the report holds only this violation.
    Fatal,
    /// Record and keep checking.
    Cumulative,
}

/// Result of running one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Nothing wrong (or the check did not apply).
    Pass,
    /// One or more defects; validation continues.
    Violations(Vec<String>),
    /// A defect that makes further checks meaningless.
    Fatal(String),
}

impl CheckOutcome {
    /// Tags raw findings with the severity of the check that produced them.
    #[must_use]
    pub fn from_findings(severity: Severity, mut findings: Vec<String>) -> Self {
        if findings.is_empty() {
            return Self::Pass;
        }
        match severity {
            Severity::Cumulative => Self::Violations(findings),
            Severity::Fatal => Self::Fatal(findings.swap_remove(0)),
        }
    }
}

/// Violations found in an entry archive, in the order the checks ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralReport {
    violations: Vec<String>,
    fatal: bool,
}

impl StructuralReport {
    /// Returns true when no violation was recorded.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Human-readable violation messages.
    #[must_use]
    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    /// Number of violations.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.violations.len()
    }

    /// Returns true when validation stopped at a fatal check.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.fatal
    }
}

/// Accumulates check outcomes until a fatal one arrives.
#[derive(Debug, Default)]
pub(crate) struct ReportBuilder {
    violations: Vec<String>,
    fatal: bool,
}

impl ReportBuilder {
    /// Records an outcome; returns false once validation must stop.
    pub(crate) fn record(&mut self, outcome: CheckOutcome) -> bool {
        match outcome {
            CheckOutcome::Pass => true,
            CheckOutcome::Violations(messages) => {
                self.violations.extend(messages);
                true
            }
            CheckOutcome::Fatal(message) => {
                self.violations = vec![message];
                self.fatal = true;
                false
            }
        }
    }

    pub(crate) fn finish(self) -> StructuralReport {
        StructuralReport {
            violations: self.violations,
            fatal: self.fatal,
        }
    }
}
