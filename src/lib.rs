//! PyWeek Core Library
//!
//! This library provides the core functionality for the `pyweek` tool, which
//! fetches a challenge's published entries and checks that an entry archive
//! follows the layout required for submission.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`manifest`] - Challenge manifest model and the HTTP manifest source
//! - [`download`] - Resumable single-file transfer engine
//! - [`challenge`] - Batch orchestration over a whole challenge manifest
//! - [`verify`] - Structural validation of entry zip archives

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod challenge;
pub mod download;
pub mod manifest;
pub mod verify;

mod user_agent;

// Re-export commonly used types
pub use challenge::{BatchError, BatchReport, ChallengeDownloader, FileOutcome, sanitize_entry_name};
pub use download::{
    DownloadError, HttpClient, NoProgress, TransferFailure, TransferKind, TransferOutcome,
    TransferProgress,
};
pub use manifest::{
    ChallengeManifest, DEFAULT_BASE_URL, FileDescriptor, HttpManifestSource, ManifestError,
    ManifestSource,
};
pub use verify::{StructuralReport, validate};
