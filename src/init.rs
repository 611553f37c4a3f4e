//! Starter manifest generation for the init command.

use std::fs;
use std::path::Path;

use crate::config::MANIFEST_FILE_NAME;
use crate::error::SyncError;

/// Default manifest template
pub const DEFAULT_MANIFEST: &str = r#"# confsync manifest
#
# Each [[files]] entry pairs a canonical source (a file in this directory)
# with the location it is deployed to. Entries are processed in the order
# they are declared here.
#
# Optional per-entry keys:
#   template = true          render {{key}} placeholders before deploying
#   only_on  = ["linux"]     restrict the entry to these operating systems
#   skip_on  = ["windows"]   exclude the entry on these operating systems

# Template variables for entries with template = true.
# Built-ins: {{os}}, {{arch}}, {{home}}
# [vars]
# editor = "vim"

# [[files]]
# source = "zsh/zshrc"
# target = "~/.zshrc"

# [[files]]
# source = "zsh/zprofile"
# target = "~/.zprofile"
"#;

/// Whether `init` wrote a manifest or left an existing one alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    AlreadyExists,
}

/// Create the configuration root with a starter manifest.
///
/// An existing manifest is left untouched unless `force` is set.
pub fn init(root: &Path, force: bool) -> Result<InitOutcome, SyncError> {
    let manifest_path = root.join(MANIFEST_FILE_NAME);
    if manifest_path.exists() && !force {
        return Ok(InitOutcome::AlreadyExists);
    }

    fs::create_dir_all(root).map_err(|e| {
        SyncError::Config(format!(
            "failed to create configuration root {}: {}",
            root.display(),
            e
        ))
    })?;

    fs::write(&manifest_path, DEFAULT_MANIFEST).map_err(|e| {
        SyncError::Config(format!(
            "failed to write {}: {}",
            manifest_path.display(),
            e
        ))
    })?;

    Ok(InitOutcome::Created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Manifest;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_root_and_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("confsync");

        let outcome = init(&root, false).unwrap();
        assert_eq!(outcome, InitOutcome::Created);
        assert!(root.join(MANIFEST_FILE_NAME).exists());

        // the starter manifest loads cleanly and is empty
        let manifest = Manifest::load(&root).unwrap();
        assert!(manifest.files.is_empty());
    }

    #[test]
    fn test_init_without_force_keeps_existing_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("confsync");

        init(&root, false).unwrap();
        fs::write(root.join(MANIFEST_FILE_NAME), "# customized\n").unwrap();

        let outcome = init(&root, false).unwrap();
        assert_eq!(outcome, InitOutcome::AlreadyExists);
        assert_eq!(
            fs::read_to_string(root.join(MANIFEST_FILE_NAME)).unwrap(),
            "# customized\n"
        );
    }

    #[test]
    fn test_init_with_force_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("confsync");

        init(&root, false).unwrap();
        fs::write(root.join(MANIFEST_FILE_NAME), "# customized\n").unwrap();

        let outcome = init(&root, true).unwrap();
        assert_eq!(outcome, InitOutcome::Created);

        let content = fs::read_to_string(root.join(MANIFEST_FILE_NAME)).unwrap();
        assert!(content.contains("confsync manifest"));
    }
}
