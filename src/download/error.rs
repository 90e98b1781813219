//! Error types for the download module.
//!
//! Two kinds of failure come out of a transfer. [`TransferFailure`] is an
//! ordinary, recoverable failure (bad status, dropped connection) that the
//! caller counts and moves past. [`DownloadError`] is fatal for the call: the
//! server and the manifest disagree about a file's size, or local I/O broke.

use std::path::PathBuf;

use thiserror::Error;

/// Recoverable reasons a single transfer did not complete.
#[derive(Debug, Error)]
pub enum TransferFailure {
    /// The server answered with something other than 200 or 206.
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that returned the status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Connection-level failure (DNS, refused, TLS, timeout, body cut short).
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL being transferred.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },
}

impl TransferFailure {
    /// Creates an HTTP status failure.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a network failure from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Returns the URL the failure refers to.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::HttpStatus { url, .. } | Self::Network { url, .. } => url,
        }
    }
}

/// Fatal errors raised by a transfer call.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The response `Content-Length` does not match the byte range requested.
    #[error(
        "invalid length {} from {url}, expected {expected_bytes}",
        actual_bytes.map_or_else(|| "<missing>".to_string(), |n| n.to_string())
    )]
    ContentLengthMismatch {
        /// The URL that was requested.
        url: String,
        /// Remaining bytes the manifest size implies.
        expected_bytes: u64,
        /// `Content-Length` sent by the server, if any.
        actual_bytes: Option<u64>,
    },

    /// The finished file is not the size the manifest promised.
    #[error("incorrect size written to {path}: expected {expected_bytes}, wrote {actual_bytes}")]
    SizeMismatch {
        /// The target file.
        path: PathBuf,
        /// Expected size in bytes.
        expected_bytes: u64,
        /// Actual size on disk in bytes.
        actual_bytes: u64,
    },

    /// File system error during the transfer (stat, open, write, flush).
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates a `Content-Length` mismatch error.
    pub fn content_length_mismatch(
        url: impl Into<String>,
        expected_bytes: u64,
        actual_bytes: Option<u64>,
    ) -> Self {
        Self::ContentLengthMismatch {
            url: url.into(),
            expected_bytes,
            actual_bytes,
        }
    }

    /// Creates a final size mismatch error.
    pub fn size_mismatch(path: impl Into<PathBuf>, expected_bytes: u64, actual_bytes: u64) -> Self {
        Self::SizeMismatch {
            path: path.into(),
            expected_bytes,
            actual_bytes,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// No `From<std::io::Error>`: every IO variant needs the path for context, so
// callers go through `DownloadError::io`.
