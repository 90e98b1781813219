//! Error types for manifest fetching.

use thiserror::Error;

/// Errors that can occur while fetching a challenge manifest.
///
/// Every variant is fatal for the download operation that needed the manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The configured base URL cannot be combined with the challenge id.
    #[error("invalid manifest URL for challenge {challenge} under {base_url}")]
    InvalidUrl {
        /// Configured service base URL.
        base_url: String,
        /// Challenge identifier.
        challenge: String,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching manifest {url}: {source}")]
    Network {
        /// The manifest URL.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("HTTP {status} fetching manifest {url}")]
    HttpStatus {
        /// The manifest URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The body was not a valid manifest document.
    #[error("malformed manifest from {url}: {source}")]
    Malformed {
        /// The manifest URL.
        url: String,
        /// The decode error.
        #[source]
        source: reqwest::Error,
    },
}

impl ManifestError {
    /// Creates an invalid URL error.
    pub fn invalid_url(base_url: impl Into<String>, challenge: impl Into<String>) -> Self {
        Self::InvalidUrl {
            base_url: base_url.into(),
            challenge: challenge.into(),
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a malformed-body error.
    pub fn malformed(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Malformed {
            url: url.into(),
            source,
        }
    }
}
