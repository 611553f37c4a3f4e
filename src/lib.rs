//! confsync - configuration file synchronization
//!
//! A tool for keeping deployed configuration files (dotfiles, mostly) in
//! agreement with a canonical source tree. The manifest at the
//! configuration root declares which files are managed; `check` reports
//! each deployed copy's status and `apply` brings it up to date.

pub mod apply;
pub mod config;
pub mod error;
pub mod init;
pub mod status;
pub mod template;

pub use apply::{ApplyOutcome, apply_all};
pub use config::{ManagedFile, Manifest};
pub use error::SyncError;
pub use status::{CheckEntry, SyncStatus, check_all};
