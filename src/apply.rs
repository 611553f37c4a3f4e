//! Deployment of canonical content to managed targets.
//!
//! Each target is replaced atomically: content goes to a temporary file in
//! the target's directory first, then a rename moves it into place, so a
//! crash mid-write never leaves a truncated target.

use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::config::{ManagedFile, Manifest};
use crate::error::SyncError;
use crate::status;

/// Result of deploying a single managed file, in manifest order
#[derive(Debug)]
pub struct ApplyOutcome {
    pub name: String,
    pub result: Result<(), SyncError>,
}

/// Deploy every managed file in manifest order.
///
/// A per-entry write failure is recorded in that entry's outcome and the
/// remaining entries are still deployed. Only a fatal error aborts.
pub fn apply_all(manifest: &Manifest) -> Result<Vec<ApplyOutcome>, SyncError> {
    let mut outcomes = Vec::with_capacity(manifest.files.len());

    for file in &manifest.files {
        let content = status::canonical_content(manifest, file)?;

        match deploy(file, &content) {
            Ok(()) => outcomes.push(ApplyOutcome {
                name: file.display_name.clone(),
                result: Ok(()),
            }),
            Err(err) => {
                tracing::error!(target = %file.display_name, error = %err, "failed to deploy entry");
                outcomes.push(ApplyOutcome {
                    name: file.display_name.clone(),
                    result: Err(err),
                });
            }
        }
    }

    Ok(outcomes)
}

/// Write content to a single target, creating parent directories as needed.
fn deploy(file: &ManagedFile, content: &[u8]) -> Result<(), SyncError> {
    let access = |e: std::io::Error| SyncError::Access {
        path: file.target_path.clone(),
        source: e,
    };

    let parent = parent_dir(&file.target_path)?;
    fs::create_dir_all(parent).map_err(access)?;

    let mut staged = NamedTempFile::new_in(parent).map_err(access)?;
    staged.write_all(content).map_err(access)?;

    #[cfg(unix)]
    copy_mode(&file.canonical_path, staged.as_file()).map_err(access)?;

    staged.persist(&file.target_path).map_err(|e| access(e.error))?;
    Ok(())
}

fn parent_dir(target: &Path) -> Result<&Path, SyncError> {
    target.parent().ok_or_else(|| {
        SyncError::Config(format!(
            "target has no parent directory: {}",
            target.display()
        ))
    })
}

/// Carry the canonical file's mode bits over to the deployed copy.
#[cfg(unix)]
fn copy_mode(canonical: &Path, staged: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(canonical)?.permissions().mode() & 0o777;
    staged.set_permissions(fs::Permissions::from_mode(mode))
}
