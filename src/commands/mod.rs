//! Subcommand runners for the confsync CLI.

pub mod apply;
pub mod check;
pub mod diff;
pub mod doctor;
pub mod init;
pub mod list;

use std::path::PathBuf;

use confsync::{Manifest, SyncError};

/// Resolve the configuration root for a command invocation.
pub(crate) fn resolve_root(config_dir: Option<PathBuf>) -> Result<PathBuf, SyncError> {
    match config_dir {
        Some(dir) => Ok(dir),
        None => Manifest::default_root(),
    }
}
