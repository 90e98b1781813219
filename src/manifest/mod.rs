//! Challenge manifest model and sources.
//!
//! A manifest lists, for every entry of a challenge, the files the service
//! publishes for it. The model is plain data; fetching it is the job of a
//! [`ManifestSource`].
//!
//! # Example
//!
//! ```no_run
//! use pyweek_core::download::HttpClient;
//! use pyweek_core::manifest::{DEFAULT_BASE_URL, HttpManifestSource, ManifestSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let source = HttpManifestSource::new(&client, DEFAULT_BASE_URL);
//! let manifest = source.fetch("33").await?;
//! println!("{} entries", manifest.entry_count());
//! # Ok(())
//! # }
//! ```

mod error;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use crate::download::HttpClient;

pub use error::ManifestError;

/// Public PyWeek service root.
pub const DEFAULT_BASE_URL: &str = "https://pyweek.org";

/// One downloadable file of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// File name only, no path separators.
    pub name: String,
    /// Absolute HTTP(S) URL of the file.
    pub url: String,
    /// Expected final byte length; a transfer is complete iff the local
    /// file has exactly this length.
    pub size: u64,
}

/// Entries of a challenge keyed by display name.
///
/// Entries iterate in name order so repeated runs process (and log) files in
/// the same sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChallengeManifest {
    entries: BTreeMap<String, Vec<FileDescriptor>>,
}

impl ChallengeManifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) an entry's file list.
    pub fn insert(&mut self, entry_name: impl Into<String>, files: Vec<FileDescriptor>) {
        self.entries.insert(entry_name.into(), files);
    }

    /// Iterates entries and their files in deterministic order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[FileDescriptor])> {
        self.entries
            .iter()
            .map(|(name, files)| (name.as_str(), files.as_slice()))
    }

    /// Number of entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of files across all entries.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Returns true when the manifest lists no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Something that can produce a challenge manifest.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Fetches the manifest for `challenge`.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError` when the manifest cannot be retrieved or parsed.
    async fn fetch(&self, challenge: &str) -> Result<ChallengeManifest, ManifestError>;
}

/// Fetches `<base_url>/<challenge>/downloads.json` from the PyWeek service.
#[derive(Debug, Clone)]
pub struct HttpManifestSource {
    client: HttpClient,
    base_url: String,
}

impl HttpManifestSource {
    /// Creates a source that reuses `client`'s connection pool.
    #[must_use]
    pub fn new(client: &HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            base_url: base_url.into(),
        }
    }

    /// Builds the manifest URL for a challenge.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::InvalidUrl` if the base URL does not parse or
    /// cannot carry path segments.
    pub fn manifest_url(&self, challenge: &str) -> Result<Url, ManifestError> {
        let invalid = || ManifestError::invalid_url(&self.base_url, challenge);
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .push(challenge)
            .push("downloads.json");
        Ok(url)
    }
}

#[async_trait]
impl ManifestSource for HttpManifestSource {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch(&self, challenge: &str) -> Result<ChallengeManifest, ManifestError> {
        let url = self.manifest_url(challenge)?;
        debug!(url = %url, "fetching manifest");

        let response = self
            .client
            .inner()
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ManifestError::network(url.as_str(), e))?;

        if !response.status().is_success() {
            return Err(ManifestError::http_status(
                url.as_str(),
                response.status().as_u16(),
            ));
        }

        let manifest: ChallengeManifest = response
            .json()
            .await
            .map_err(|e| ManifestError::malformed(url.as_str(), e))?;
        debug!(
            entries = manifest.entry_count(),
            files = manifest.file_count(),
            "manifest fetched"
        );
        Ok(manifest)
    }
}
