//! Error types for challenge downloads.

use std::path::PathBuf;

use thiserror::Error;

use crate::download::DownloadError;
use crate::manifest::ManifestError;

/// Errors that abort a whole challenge download.
///
/// Per-file transport failures are not errors; they are recorded in the
/// [`BatchReport`](super::BatchReport) and the run continues.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The manifest could not be fetched or parsed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The target or an entry directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A transfer broke a size invariant or hit a local I/O error.
    #[error(transparent)]
    Transfer(#[from] DownloadError),
}

impl BatchError {
    /// Creates a directory creation error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }
}
