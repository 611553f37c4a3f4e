//! Sync status evaluation.
//!
//! Compares each deployed target against its canonical source and reports
//! one of a small closed set of states. Status is computed on demand and
//! never persisted.

use serde::Serialize;
use std::fs;

use crate::config::{ManagedFile, Manifest};
use crate::error::SyncError;
use crate::template;

/// Sync state of a single managed file, derived at evaluation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncStatus {
    /// The target does not exist
    Missing,
    /// The target content equals the canonical content byte-for-byte
    UpToDate,
    /// The target exists but its content differs
    Stale,
}

impl SyncStatus {
    /// The textual phrase used in `check` report lines.
    pub fn phrase(&self) -> &'static str {
        match self {
            SyncStatus::Missing => "does not exist",
            SyncStatus::UpToDate => "is up to date",
            SyncStatus::Stale => "is NOT up to date",
        }
    }
}

/// One report line of a `check` run, in manifest order
#[derive(Debug)]
pub struct CheckEntry {
    pub name: String,
    /// The evaluated status, or the access failure for this one entry
    pub outcome: Result<SyncStatus, SyncError>,
}

/// Read the canonical content for an entry, rendered when it opts in.
///
/// The manifest promised the canonical source exists, so any read failure
/// here is fatal.
pub fn canonical_content(manifest: &Manifest, file: &ManagedFile) -> Result<Vec<u8>, SyncError> {
    let bytes = fs::read(&file.canonical_path).map_err(|e| {
        SyncError::Config(format!(
            "cannot read canonical source {}: {}",
            file.canonical_path.display(),
            e
        ))
    })?;

    if file.template {
        let text = String::from_utf8_lossy(&bytes);
        let vars = template::resolve_variables(&manifest.vars);
        Ok(template::substitute(&text, &vars).into_bytes())
    } else {
        Ok(bytes)
    }
}

/// Evaluate the sync status of a single managed file.
pub fn evaluate(manifest: &Manifest, file: &ManagedFile) -> Result<SyncStatus, SyncError> {
    if !file.target_path.exists() {
        return Ok(SyncStatus::Missing);
    }

    let canonical = canonical_content(manifest, file)?;
    let deployed = fs::read(&file.target_path).map_err(|e| SyncError::Access {
        path: file.target_path.clone(),
        source: e,
    })?;

    if deployed == canonical {
        Ok(SyncStatus::UpToDate)
    } else {
        Ok(SyncStatus::Stale)
    }
}

/// Evaluate every managed file in manifest order.
///
/// A per-entry access failure is recorded in that entry's outcome and the
/// remaining entries are still evaluated. Only a fatal error aborts.
pub fn check_all(manifest: &Manifest) -> Result<Vec<CheckEntry>, SyncError> {
    let mut entries = Vec::with_capacity(manifest.files.len());

    for file in &manifest.files {
        match evaluate(manifest, file) {
            Ok(status) => entries.push(CheckEntry {
                name: file.display_name.clone(),
                outcome: Ok(status),
            }),
            Err(err) if !err.is_fatal() => {
                tracing::warn!(target = %file.display_name, error = %err, "target not readable");
                entries.push(CheckEntry {
                    name: file.display_name.clone(),
                    outcome: Err(err),
                });
            }
            Err(fatal) => return Err(fatal),
        }
    }

    Ok(entries)
}
