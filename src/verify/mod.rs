//! Structural validation of entry archives.
//!
//! An entry must be uploaded as `<Name>-<major>.<minor>[.<patch>].zip`
//! holding a single top-level directory named like the archive, with
//! `run_game.py`, `requirements.txt` and `README.md` directly inside it.
//!
//! Validation runs the checks in [`CHECKS`] in order. A fatal check that
//! fails ends validation with that single violation; cumulative checks keep
//! going so every defect shows up in one pass. Only the archive's central
//! directory is read.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let report = pyweek_core::verify::validate(Path::new("My-Game-1.0.zip"));
//! for violation in report.violations() {
//!     eprintln!("{violation}");
//! }
//! ```

mod report;

use std::fs::File;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};
use zip::ZipArchive;

pub use report::{CheckOutcome, Severity, StructuralReport};
use report::ReportBuilder;

#[allow(clippy::expect_used)]
static NAMING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9-]+-[0-9]+\.[0-9]+(\.[0-9]+)?\.zip$")
        .expect("naming regex is valid") // Static pattern, safe to panic
});

/// Files every entry must ship in its top-level directory, with the reason.
pub const REQUIRED_MEMBERS: &[(&str, &str)] = &[
    (
        "run_game.py",
        "This file should be the entry point for your game. Running it should start your game.",
    ),
    (
        "requirements.txt",
        "This file should contain a list of dependencies. Create it by running \"pip freeze > requirements.txt\".",
    ),
    (
        "README.md",
        "This file should contain a description of your game and the controls.",
    ),
];

/// One validation rule.
pub struct Check {
    /// Short identifier used in logs.
    pub name: &'static str,
    /// What a failure of this rule does to the rest of the run.
    pub severity: Severity,
    run: fn(&mut Inspection<'_>) -> Vec<String>,
}

/// Validation rules in execution order.
pub static CHECKS: &[Check] = &[
    Check {
        name: "exists",
        severity: Severity::Fatal,
        run: check_exists,
    },
    Check {
        name: "extension",
        severity: Severity::Fatal,
        run: check_extension,
    },
    Check {
        name: "naming-convention",
        severity: Severity::Cumulative,
        run: check_naming_convention,
    },
    Check {
        name: "archive-open",
        severity: Severity::Fatal,
        run: check_archive_open,
    },
    Check {
        name: "single-top-level-dir",
        severity: Severity::Cumulative,
        run: check_single_top_level_dir,
    },
    Check {
        name: "top-level-dir-name",
        severity: Severity::Cumulative,
        run: check_top_level_dir_name,
    },
    Check {
        name: "required-members",
        severity: Severity::Cumulative,
        run: check_required_members,
    },
];

/// State shared between checks as they learn about the archive.
struct Inspection<'a> {
    path: &'a Path,
    members: Vec<String>,
    top_level_dir: Option<String>,
}

/// Validates the entry archive at `path`.
///
/// Never fails: every problem, including I/O problems, becomes a violation
/// in the returned report.
#[must_use]
#[instrument(skip_all, fields(path = %path.display()))]
pub fn validate(path: &Path) -> StructuralReport {
    let mut inspection = Inspection {
        path,
        members: Vec::new(),
        top_level_dir: None,
    };
    let mut builder = ReportBuilder::default();

    for check in CHECKS {
        let findings = (check.run)(&mut inspection);
        debug!(check = check.name, findings = findings.len(), "check ran");
        if !builder.record(CheckOutcome::from_findings(check.severity, findings)) {
            break;
        }
    }

    builder.finish()
}

fn check_exists(inspection: &mut Inspection<'_>) -> Vec<String> {
    if inspection.path.exists() {
        Vec::new()
    } else {
        vec![format!("File {} does not exist.", inspection.path.display())]
    }
}

fn check_extension(inspection: &mut Inspection<'_>) -> Vec<String> {
    if inspection.path.extension().is_some_and(|ext| ext == "zip") {
        Vec::new()
    } else {
        vec!["File is not a zip file.".to_string()]
    }
}

fn check_naming_convention(inspection: &mut Inspection<'_>) -> Vec<String> {
    let matches = inspection
        .path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| NAMING_PATTERN.is_match(name));
    if matches {
        Vec::new()
    } else {
        vec![
            "File does not follow the proper naming convention.\n    \
             The file name should be in the format: {Name-of-Entry}-{major.minor}.zip\n    \
             Example: \"My-Game-1.0.zip\" or \"my-game-1.0.1.zip\""
                .to_string(),
        ]
    }
}

fn check_archive_open(inspection: &mut Inspection<'_>) -> Vec<String> {
    if inspection.path.is_dir() {
        return vec!["File is a directory.".to_string()];
    }
    let file = match File::open(inspection.path) {
        Ok(file) => file,
        Err(e) => return vec![format!("File could not be opened: {e}.")],
    };
    match ZipArchive::new(file) {
        Ok(archive) => {
            inspection.members = archive.file_names().map(str::to_string).collect();
            Vec::new()
        }
        Err(e) => {
            debug!(error = %e, "zip central directory unreadable");
            vec!["File is not a valid zip file.".to_string()]
        }
    }
}

fn check_single_top_level_dir(inspection: &mut Inspection<'_>) -> Vec<String> {
    let mut top_level: Vec<&str> = inspection
        .members
        .iter()
        .filter_map(|name| name.split('/').next())
        .collect();
    top_level.sort_unstable();
    top_level.dedup();

    match top_level.as_slice() {
        [only] => {
            inspection.top_level_dir = Some((*only).to_string());
            Vec::new()
        }
        // An empty archive has no shared first segment either; it gets its own
        // message instead of being called "multiple".
        [] => vec!["File contains no top-level directory.".to_string()],
        _ => vec!["File contains multiple top-level directories.".to_string()],
    }
}

fn check_top_level_dir_name(inspection: &mut Inspection<'_>) -> Vec<String> {
    let Some(dir_name) = inspection.top_level_dir.as_deref() else {
        return Vec::new();
    };
    let stem = inspection
        .path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    if dir_name == stem {
        Vec::new()
    } else {
        vec![format!(
            "File contains a top-level directory named \"{dir_name}\".\n    \
             This directory should be named \"{stem}/\"."
        )]
    }
}

fn check_required_members(inspection: &mut Inspection<'_>) -> Vec<String> {
    let Some(dir_name) = inspection.top_level_dir.as_deref() else {
        return Vec::new();
    };
    let direct_children: Vec<&str> = inspection
        .members
        .iter()
        .filter_map(|name| direct_child(name, dir_name))
        .collect();

    REQUIRED_MEMBERS
        .iter()
        .filter(|(required, _)| !direct_children.contains(required))
        .map(|(required, reason)| format!("File is missing \"{required}\".\n    {reason}"))
        .collect()
}

/// `dir/<name>` with exactly one separator and a non-empty `<name>`.
fn direct_child<'n>(member: &'n str, dir_name: &str) -> Option<&'n str> {
    let (first, rest) = member.split_once('/')?;
    (first == dir_name && !rest.is_empty() && !rest.contains('/')).then_some(rest)
}
