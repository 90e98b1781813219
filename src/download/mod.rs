//! Resumable HTTP transfer engine for single files.
//!
//! This module moves one remote file to one local path, continuing an
//! interrupted download with a byte-range request instead of starting over.
//!
//! # Features
//!
//! - Cold transfers (HTTP 200) and resumed transfers (HTTP 206)
//! - Byte-exact verification against the manifest size
//! - Raw transport bytes written as received (no content decoding)
//! - Pluggable progress reporting via [`TransferProgress`]
//!
//! # Example
//!
//! ```no_run
//! use pyweek_core::download::{HttpClient, NoProgress};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let outcome = client
//!     .transfer(
//!         "https://example.com/frog-1.0.zip",
//!         Path::new("./frog/frog-1.0.zip"),
//!         1024,
//!         &mut NoProgress,
//!     )
//!     .await?;
//! println!("completed: {}", outcome.is_completed());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod error;
mod progress;

pub use client::{HttpClient, TransferOutcome};
pub use error::{DownloadError, TransferFailure};
pub use progress::{NoProgress, TransferKind, TransferProgress};

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
