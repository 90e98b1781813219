//! Batch download of every file published for a challenge.
//!
//! [`ChallengeDownloader`] walks a challenge manifest, lays files out as
//! `<target>/<sanitized-entry-name>/<file-name>`, skips files that are
//! already complete and hands everything else to the transfer engine, one
//! file at a time in manifest order.

mod error;
mod report;
mod sanitize;

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::download::{HttpClient, TransferOutcome, TransferProgress};
use crate::manifest::{FileDescriptor, ManifestSource};

pub use error::BatchError;
pub use report::{BatchReport, FileOutcome};
pub use sanitize::sanitize_entry_name;

/// Drives the transfer engine over a challenge manifest.
///
/// Both collaborators are borrowed: the caller builds the client once and the
/// same connection pool serves the manifest fetch and every transfer.
pub struct ChallengeDownloader<'a> {
    client: &'a HttpClient,
    manifests: &'a dyn ManifestSource,
}

impl<'a> ChallengeDownloader<'a> {
    /// Creates a downloader over the given client and manifest source.
    #[must_use]
    pub fn new(client: &'a HttpClient, manifests: &'a dyn ManifestSource) -> Self {
        Self { client, manifests }
    }

    /// Downloads every file of `challenge` into `target_dir`.
    ///
    /// Re-running over the same directory is safe: complete files are skipped
    /// without a request and partial files are resumed.
    ///
    /// # Errors
    ///
    /// Returns `BatchError` if a directory cannot be created, the manifest
    /// cannot be fetched, or a transfer reports a fatal size or I/O error.
    /// Ordinary per-file failures are counted in the returned report instead.
    #[instrument(skip(self, target_dir, progress), fields(target_dir = %target_dir.display()))]
    pub async fn download_challenge(
        &self,
        challenge: &str,
        target_dir: &Path,
        progress: &mut dyn TransferProgress,
    ) -> Result<BatchReport, BatchError> {
        ensure_dir(target_dir).await?;

        let manifest = self.manifests.fetch(challenge).await?;
        info!(
            entries = manifest.entry_count(),
            files = manifest.file_count(),
            "Fetched manifest for challenge {challenge}"
        );
        if manifest.is_empty() {
            warn!("Warning: challenge {challenge} has no published entries");
        }

        let mut report = BatchReport::new();
        for (entry_name, files) in manifest.entries() {
            let entry_dir = target_dir.join(sanitize_entry_name(entry_name));
            ensure_dir(&entry_dir).await?;

            for file in files {
                let outcome = self.download_file(&entry_dir, file, progress).await?;
                report.record(outcome);
            }
        }

        info!(
            downloaded = report.downloaded_count(),
            skipped = report.skipped_count(),
            failed = report.error_count(),
            "Challenge download finished"
        );
        Ok(report)
    }

    async fn download_file(
        &self,
        entry_dir: &Path,
        file: &FileDescriptor,
        progress: &mut dyn TransferProgress,
    ) -> Result<FileOutcome, BatchError> {
        let target = entry_dir.join(&file.name);

        if !is_plain_file_name(&file.name) {
            warn!(name = %file.name, url = %file.url, "Warning: refusing unsafe file name");
            return Ok(FileOutcome::Failed {
                path: target,
                reason: format!("unsafe file name {:?} for {}", file.name, file.url),
            });
        }

        if is_complete(&target, file.size).await {
            debug!(path = %target.display(), "already downloaded, skipping");
            return Ok(FileOutcome::Skipped { path: target });
        }

        let outcome = self
            .client
            .transfer(&file.url, &target, file.size, progress)
            .await?;
        Ok(match outcome {
            TransferOutcome::Completed { kind, .. } => FileOutcome::Downloaded { path: target, kind },
            TransferOutcome::Failed(failure) => {
                debug!(url = failure.url(), path = %target.display(), "transfer failed");
                FileOutcome::Failed {
                    path: target,
                    reason: failure.to_string(),
                }
            }
        })
    }
}

async fn ensure_dir(path: &Path) -> Result<(), BatchError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| BatchError::create_dir(path, e))
}

async fn is_complete(target: &Path, size: u64) -> bool {
    tokio::fs::metadata(target)
        .await
        .is_ok_and(|meta| meta.is_file() && meta.len() == size)
}

/// A manifest file name must stay inside its entry directory.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}
