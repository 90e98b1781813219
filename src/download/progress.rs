//! Progress reporting hooks for the transfer engine.

/// How a transfer was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    /// Full body (HTTP 200) written from byte zero.
    Cold,
    /// Partial body (HTTP 206) appended to an existing file.
    Resume,
}

impl TransferKind {
    /// Verb shown to the user for this kind of transfer.
    #[must_use]
    pub fn verb(self) -> &'static str {
        match self {
            Self::Cold => "Downloading",
            Self::Resume => "Resuming",
        }
    }
}

/// Receives progress updates while a file is being written.
///
/// Updates are purely observational; an implementation must not affect the
/// transfer itself.
pub trait TransferProgress: Send {
    /// Called once the response status is known, before the first chunk.
    fn start(&mut self, label: &str, kind: TransferKind, current: u64, total: u64);

    /// Called after every chunk write with the file's current length.
    fn advance(&mut self, current: u64);

    /// Called when the body stream ends, successfully or not.
    fn finish(&mut self);
}

/// Progress sink that ignores every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl TransferProgress for NoProgress {
    fn start(&mut self, _label: &str, _kind: TransferKind, _current: u64, _total: u64) {}

    fn advance(&mut self, _current: u64) {}

    fn finish(&mut self) {}
}
