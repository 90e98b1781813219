//! CLI output formatting and display helpers.

use std::path::Path;

use pyweek_core::{BatchReport, StructuralReport};

/// Reset all formatting
const RESET: &str = "\x1b[0m";

/// Red text (errors, failures)
const RED: &str = "\x1b[31m";

/// Green text (success)
const GREEN: &str = "\x1b[32m";

fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{color}{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// Final line of a challenge download.
pub(crate) fn download_summary_line(report: &BatchReport) -> String {
    match report.error_count() {
        0 => "All files downloaded successfully.".to_string(),
        errors => format!("{errors} errors occurred while downloading files."),
    }
}

pub(crate) fn print_download_summary(report: &BatchReport, color: bool) {
    let line = download_summary_line(report);
    if report.is_success() {
        println!("{}", paint(&line, GREEN, color));
    } else {
        println!("{}", paint(&line, RED, color));
    }
}

/// Lines printed for a verification report, blank lines between violations.
pub(crate) fn verify_report_lines(path: &Path, report: &StructuralReport) -> Vec<String> {
    if report.passed() {
        return vec![format!("File {} is valid.", path.display())];
    }

    let mut lines = Vec::new();
    for violation in report.violations() {
        lines.push(violation.clone());
        lines.push(String::new());
    }
    let count = report.error_count();
    let plural = if count > 1 { "s" } else { "" };
    lines.push(format!(
        "{count} error{plural} occurred while verifying file {}.",
        path.display()
    ));
    lines
}

pub(crate) fn print_verify_report(path: &Path, report: &StructuralReport, color: bool) {
    let tint = if report.passed() { GREEN } else { RED };
    for line in verify_report_lines(path, report) {
        if line.is_empty() {
            println!();
        } else {
            println!("{}", paint(&line, tint, color));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pyweek_core::FileOutcome;

    use super::*;

    #[test]
    fn test_paint_respects_color_flag() {
        assert_eq!(paint("ok", GREEN, false), "ok");
        assert_eq!(paint("ok", GREEN, true), "\x1b[32mok\x1b[0m");
    }

    #[test]
    fn test_download_summary_line_success_and_failure() {
        let mut report = BatchReport::new();
        assert_eq!(
            download_summary_line(&report),
            "All files downloaded successfully."
        );

        report.record(FileOutcome::Failed {
            path: PathBuf::from("a/b.zip"),
            reason: "HTTP 500".to_string(),
        });
        report.record(FileOutcome::Failed {
            path: PathBuf::from("a/c.zip"),
            reason: "HTTP 404".to_string(),
        });
        assert_eq!(
            download_summary_line(&report),
            "2 errors occurred while downloading files."
        );
    }

    #[test]
    fn test_verify_lines_for_missing_file() {
        let path = Path::new("does-not-exist-1.0.zip");
        let report = pyweek_core::validate(path);
        let lines = verify_report_lines(path, &report);
        assert_eq!(lines[0], "File does-not-exist-1.0.zip does not exist.");
        assert_eq!(
            lines.last().map(String::as_str),
            Some("1 error occurred while verifying file does-not-exist-1.0.zip.")
        );
    }
}
