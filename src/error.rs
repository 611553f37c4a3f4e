//! Error taxonomy for the sync engine.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the sync engine.
///
/// `Config` is fatal: the manifest, configuration root, or a canonical
/// source is missing or malformed, and the whole command aborts.
/// `Access` is scoped to a single target: it is folded into that entry's
/// reported line and must not stop the remaining entries.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("cannot access {}: {source}", .path.display())]
    Access {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl SyncError {
    /// Whether this error aborts the whole command rather than one entry.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SyncError::Config(_))
    }
}
