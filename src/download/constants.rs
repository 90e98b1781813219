//! Constants for the download module (timeouts, chunking).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large entry archives).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Size of each write to the target file (100 KiB).
pub const CHUNK_SIZE: usize = 100 * 1024;
