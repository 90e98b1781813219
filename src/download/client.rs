//! HTTP client wrapper and the resumable transfer engine.
//!
//! This module provides the `HttpClient` struct, which owns the connection pool
//! shared by the manifest fetch and every file transfer of a run, and the
//! [`HttpClient::transfer`] operation that moves one remote file to one local
//! path.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{CONTENT_LENGTH, RANGE};
use reqwest::{Client, StatusCode};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

use super::constants::{CHUNK_SIZE, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::{DownloadError, TransferFailure};
use super::progress::{TransferKind, TransferProgress};
use crate::user_agent;

/// HTTP client shared across a whole run.
///
/// This client is designed to be created once and passed by reference to the
/// manifest source and the challenge downloader, taking advantage of
/// connection pooling across sequential transfers.
///
/// The client is built without transparent content decoding, so a body served
/// with `Content-Encoding: gzip` is written byte-for-byte as it arrived.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

/// Result of a single transfer that did not hit a fatal error.
#[derive(Debug)]
pub enum TransferOutcome {
    /// The body was streamed and the file now has exactly the expected size.
    Completed {
        /// Whether the body was a full (200) or partial (206) response.
        kind: TransferKind,
        /// Bytes written by this call (excluding bytes already on disk).
        bytes_written: u64,
    },
    /// The transfer did not complete; remaining files can still be processed.
    Failed(TransferFailure),
}

impl TransferOutcome {
    /// Returns true when the file was fully transferred.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 5 minutes (for large entry archives)
    /// - Content decoding: disabled
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .user_agent(user_agent::default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Returns a reference to the underlying reqwest client.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Transfers `url` into `target`, resuming a partial file when possible.
    ///
    /// - `target` missing: plain GET, expects 200, file created.
    /// - `target` shorter than `expected_size`: ranged GET from the current
    ///   length, expects 206, bytes appended.
    /// - `target` at or beyond `expected_size`: treated as invalid and
    ///   downloaded again from byte zero.
    ///
    /// The caller owns the parent directory; this never creates directories.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` when the response `Content-Length` disagrees with
    /// the requested range, when the final file size is not `expected_size`,
    /// or when the local file cannot be read or written. Status and network
    /// failures are not errors; they come back as [`TransferOutcome::Failed`].
    #[instrument(level = "debug", skip(self, target, progress), fields(url = %url, target = %target.display()))]
    pub async fn transfer(
        &self,
        url: &str,
        target: &Path,
        expected_size: u64,
        progress: &mut dyn TransferProgress,
    ) -> Result<TransferOutcome, DownloadError> {
        let plan = ResumePlan::for_target(target, expected_size).await?;
        let range = plan.range_header(expected_size);
        debug!(start = plan.start, range = ?range, "planned transfer");

        let mut request = self.client.get(url);
        if let Some(range) = range {
            request = request.header(RANGE, range);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(source) => {
                warn!(url = %url, error = %source, "Warning: error downloading {url}");
                return Ok(TransferOutcome::Failed(TransferFailure::network(url, source)));
            }
        };

        let kind = match response.status() {
            StatusCode::OK => TransferKind::Cold,
            StatusCode::PARTIAL_CONTENT => TransferKind::Resume,
            status => {
                warn!(url = %url, status = status.as_u16(), "Warning: error downloading {url}");
                return Ok(TransferOutcome::Failed(TransferFailure::http_status(
                    url,
                    status.as_u16(),
                )));
            }
        };

        let remaining = expected_size.saturating_sub(plan.start);
        let declared = declared_content_length(&response);
        if declared != Some(remaining) {
            return Err(DownloadError::content_length_mismatch(url, remaining, declared));
        }

        let mut file = open_target(target, kind).await?;
        let initial = file_len(&file, target).await?;

        let label = display_label(target);
        info!("{} {label}", kind.verb());
        progress.start(&label, kind, initial, expected_size);
        let streamed = stream_chunks(&mut file, response, target, initial, progress).await;
        progress.finish();

        let bytes_written = match streamed? {
            StreamEnd::Complete(bytes_written) => bytes_written,
            StreamEnd::Interrupted(source) => {
                warn!(url = %url, error = %source, "Warning: error downloading {url}");
                return Ok(TransferOutcome::Failed(TransferFailure::network(url, source)));
            }
        };

        let final_len = file_len(&file, target).await?;
        if final_len != expected_size {
            return Err(DownloadError::size_mismatch(target, expected_size, final_len));
        }

        debug!(bytes = bytes_written, kind = ?kind, "transfer complete");
        Ok(TransferOutcome::Completed {
            kind,
            bytes_written,
        })
    }
}

/// Where a transfer starts, derived from what is already on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResumePlan {
    /// First byte to request.
    pub(crate) start: u64,
    /// Whether a byte-range request is sent.
    pub(crate) ranged: bool,
}

impl ResumePlan {
    /// Inspects `target` and decides the starting offset.
    ///
    /// A file already at or past `expected_size` is not trusted: the plan
    /// restarts from zero without a range.
    pub(crate) async fn for_target(target: &Path, expected_size: u64) -> Result<Self, DownloadError> {
        match tokio::fs::metadata(target).await {
            Ok(meta) if meta.len() < expected_size => Ok(Self {
                start: meta.len(),
                ranged: true,
            }),
            Ok(_) => Ok(Self::cold()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::cold()),
            Err(e) => Err(DownloadError::io(target, e)),
        }
    }

    fn cold() -> Self {
        Self {
            start: 0,
            ranged: false,
        }
    }

    /// `Range` header value for this plan, if any.
    pub(crate) fn range_header(self, expected_size: u64) -> Option<String> {
        self.ranged
            .then(|| format!("bytes={}-{expected_size}", self.start))
    }
}

enum StreamEnd {
    Complete(u64),
    Interrupted(reqwest::Error),
}

async fn open_target(target: &Path, kind: TransferKind) -> Result<File, DownloadError> {
    let opened = match kind {
        TransferKind::Resume => {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(target)
                .await
        }
        TransferKind::Cold => File::create(target).await,
    };
    opened.map_err(|e| DownloadError::io(target, e))
}

async fn file_len(file: &File, target: &Path) -> Result<u64, DownloadError> {
    file.metadata()
        .await
        .map(|meta| meta.len())
        .map_err(|e| DownloadError::io(target, e))
}

/// Streams the raw body into `file`, one flushed write per chunk.
///
/// Every chunk reaches the file before the next read, so an interrupted run
/// leaves a file whose length is a valid resume offset.
async fn stream_chunks(
    file: &mut File,
    response: reqwest::Response,
    target: &Path,
    initial: u64,
    progress: &mut dyn TransferProgress,
) -> Result<StreamEnd, DownloadError> {
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(next) = stream.next().await {
        let bytes = match next {
            Ok(bytes) => bytes,
            Err(source) => return Ok(StreamEnd::Interrupted(source)),
        };

        for piece in bytes.chunks(CHUNK_SIZE) {
            file.write_all(piece)
                .await
                .map_err(|e| DownloadError::io(target, e))?;
            file.flush().await.map_err(|e| DownloadError::io(target, e))?;
            bytes_written += piece.len() as u64;
            progress.advance(initial + bytes_written);
        }
    }

    Ok(StreamEnd::Complete(bytes_written))
}

fn declared_content_length(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

/// `<parent-dir>/<file-name>` label used in per-file output lines.
fn display_label(target: &Path) -> String {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match target.parent().and_then(Path::file_name) {
        Some(parent) => format!(
            "{}{}{name}",
            parent.to_string_lossy(),
            std::path::MAIN_SEPARATOR
        ),
        None => name,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_resume_plan_missing_file_is_cold() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("game.zip");

        let plan = ResumePlan::for_target(&target, 100).await.unwrap();

        assert_eq!(plan.start, 0);
        assert_eq!(plan.range_header(100), None);
    }

    #[tokio::test]
    async fn test_resume_plan_partial_file_requests_remaining_range() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("game.zip");
        std::fs::write(&target, vec![1u8; 40]).unwrap();

        let plan = ResumePlan::for_target(&target, 100).await.unwrap();

        assert_eq!(plan.start, 40);
        assert_eq!(plan.range_header(100).as_deref(), Some("bytes=40-100"));
    }

    #[tokio::test]
    async fn test_resume_plan_empty_existing_file_still_ranged_from_zero() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("game.zip");
        std::fs::write(&target, b"").unwrap();

        let plan = ResumePlan::for_target(&target, 10).await.unwrap();

        assert_eq!(plan.range_header(10).as_deref(), Some("bytes=0-10"));
    }

    #[tokio::test]
    async fn test_resume_plan_oversized_file_restarts_from_zero() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("game.zip");
        std::fs::write(&target, vec![1u8; 150]).unwrap();

        let plan = ResumePlan::for_target(&target, 100).await.unwrap();

        assert_eq!(plan.start, 0);
        assert_eq!(plan.range_header(100), None);
    }

    #[tokio::test]
    async fn test_resume_plan_exact_size_file_restarts_from_zero() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("game.zip");
        std::fs::write(&target, vec![1u8; 100]).unwrap();

        let plan = ResumePlan::for_target(&target, 100).await.unwrap();

        assert_eq!(plan, ResumePlan::cold());
    }

    #[test]
    fn test_display_label_uses_parent_and_name() {
        let label = display_label(Path::new("/downloads/what-the-frog/frog-1.0.zip"));
        assert_eq!(
            label,
            format!("what-the-frog{}frog-1.0.zip", std::path::MAIN_SEPARATOR)
        );
    }

    #[test]
    fn test_http_client_default_builds() {
        let client = HttpClient::default();
        drop(client.inner().clone());
    }
}
