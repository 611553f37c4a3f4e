//! Manifest loading for confsync.
//!
//! The manifest is a declarative TOML file at the configuration root that
//! pairs canonical sources (files under the root) with the filesystem
//! locations they are deployed to. Membership is explicit: nothing is
//! discovered by scanning directories.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SyncError;

/// Default manifest file name
pub const MANIFEST_FILE_NAME: &str = "confsync.toml";

/// Directory name under the user configuration directory
pub const DEFAULT_ROOT_DIR: &str = "confsync";

/// Raw manifest structure as written on disk
#[derive(Debug, Deserialize)]
struct RawManifest {
    /// Template variables available to `template = true` entries
    #[serde(default)]
    vars: HashMap<String, String>,

    /// Managed file entries, in declaration order
    #[serde(default)]
    files: Vec<RawEntry>,
}

/// A single `[[files]]` entry as written on disk
#[derive(Debug, Deserialize)]
struct RawEntry {
    /// Canonical source path (relative to the configuration root)
    source: String,

    /// Deployment location; a leading `~` expands to the home directory
    target: String,

    /// Render `{{key}}` placeholders before comparison and deployment
    #[serde(default)]
    template: bool,

    /// Restrict the entry to these operating systems
    #[serde(default)]
    only_on: Option<Vec<String>>,

    /// Exclude the entry on these operating systems
    #[serde(default)]
    skip_on: Option<Vec<String>>,
}

impl RawEntry {
    fn applies_to(&self, os: &str) -> bool {
        if let Some(only) = &self.only_on
            && !only.iter().any(|candidate| candidate == os)
        {
            return false;
        }
        if let Some(skip) = &self.skip_on
            && skip.iter().any(|candidate| candidate == os)
        {
            return false;
        }
        true
    }
}

/// A canonical-source/target pairing tracked by the manifest
#[derive(Debug, Clone)]
pub struct ManagedFile {
    /// Location of the authoritative content, under the configuration root
    pub canonical_path: PathBuf,

    /// Deployment location on the filesystem
    pub target_path: PathBuf,

    /// Identifier used in reports (the expanded target path)
    pub display_name: String,

    /// Whether canonical content is rendered before use
    pub template: bool,
}

/// The loaded set of managed files, immutable for one invocation
#[derive(Debug)]
pub struct Manifest {
    /// Configuration root the manifest was loaded from
    pub root: PathBuf,

    /// Template variables from the `[vars]` table
    pub vars: HashMap<String, String>,

    /// Entries applicable on this host, in declaration order
    pub files: Vec<ManagedFile>,

    /// Every declared canonical source, including entries filtered out
    /// for this host. Used by diagnostics, never by sync operations.
    pub declared_sources: Vec<PathBuf>,
}

impl Manifest {
    /// Default configuration root (`~/.config/confsync` on Linux)
    pub fn default_root() -> Result<PathBuf, SyncError> {
        dirs::config_dir()
            .map(|dir| dir.join(DEFAULT_ROOT_DIR))
            .ok_or_else(|| {
                SyncError::Config("could not determine the user configuration directory".into())
            })
    }

    /// Load the manifest from a configuration root.
    ///
    /// Fails if the root or manifest file is absent or malformed, or if
    /// two entries claim the same target.
    pub fn load(root: &Path) -> Result<Self, SyncError> {
        if !root.is_dir() {
            return Err(SyncError::Config(format!(
                "configuration root does not exist: {}",
                root.display()
            )));
        }

        let manifest_path = root.join(MANIFEST_FILE_NAME);
        let content = fs::read_to_string(&manifest_path).map_err(|e| {
            SyncError::Config(format!("failed to read {}: {}", manifest_path.display(), e))
        })?;

        let raw: RawManifest = toml::from_str(&content).map_err(|e| {
            SyncError::Config(format!("failed to parse {}: {}", manifest_path.display(), e))
        })?;

        Self::from_raw(raw, root)
    }

    fn from_raw(raw: RawManifest, root: &Path) -> Result<Self, SyncError> {
        let mut files = Vec::with_capacity(raw.files.len());
        let mut declared_sources = Vec::with_capacity(raw.files.len());
        let mut seen_targets: HashSet<PathBuf> = HashSet::new();

        for entry in &raw.files {
            declared_sources.push(root.join(&entry.source));

            if !entry.applies_to(std::env::consts::OS) {
                continue;
            }

            let target_path = expand_target(&entry.target)?;
            if !seen_targets.insert(target_path.clone()) {
                return Err(SyncError::Config(format!(
                    "duplicate target: {}",
                    target_path.display()
                )));
            }

            let display_name = target_path.display().to_string();
            files.push(ManagedFile {
                canonical_path: root.join(&entry.source),
                target_path,
                display_name,
                template: entry.template,
            });
        }

        Ok(Self {
            root: root.to_path_buf(),
            vars: raw.vars,
            files,
            declared_sources,
        })
    }
}

/// Expand a leading `~` to the home directory.
fn expand_target(target: &str) -> Result<PathBuf, SyncError> {
    if target == "~" || target.starts_with("~/") {
        let home = dirs::home_dir()
            .ok_or_else(|| SyncError::Config("could not determine the home directory".into()))?;
        if target == "~" {
            Ok(home)
        } else {
            Ok(home.join(&target[2..]))
        }
    } else {
        Ok(PathBuf::from(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load_from_str(manifest: &str) -> Result<Manifest, SyncError> {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(MANIFEST_FILE_NAME), manifest).unwrap();
        Manifest::load(temp_dir.path())
    }

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = load_from_str(
            r#"
            [[files]]
            source = "zsh/zshrc"
            target = "/tmp/confsync-test/.zshrc"
        "#,
        )
        .unwrap();

        assert_eq!(manifest.files.len(), 1);
        assert_eq!(manifest.files[0].display_name, "/tmp/confsync-test/.zshrc");
        assert!(!manifest.files[0].template);
        assert!(manifest.files[0].canonical_path.ends_with("zsh/zshrc"));
    }

    #[test]
    fn test_parse_full_manifest() {
        let manifest = load_from_str(
            r#"
            [vars]
            editor = "vim"

            [[files]]
            source = "git/gitconfig"
            target = "/tmp/confsync-test/.gitconfig"
            template = true

            [[files]]
            source = "zsh/zshrc"
            target = "/tmp/confsync-test/.zshrc"
        "#,
        )
        .unwrap();

        assert_eq!(manifest.vars.get("editor").map(String::as_str), Some("vim"));
        assert_eq!(manifest.files.len(), 2);
        assert!(manifest.files[0].template);
        assert!(!manifest.files[1].template);
    }

    #[test]
    fn test_entries_keep_declaration_order() {
        let manifest = load_from_str(
            r#"
            [[files]]
            source = "b"
            target = "/tmp/confsync-test/b"

            [[files]]
            source = "a"
            target = "/tmp/confsync-test/a"

            [[files]]
            source = "c"
            target = "/tmp/confsync-test/c"
        "#,
        )
        .unwrap();

        let names: Vec<&str> = manifest
            .files
            .iter()
            .map(|f| f.display_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "/tmp/confsync-test/b",
                "/tmp/confsync-test/a",
                "/tmp/confsync-test/c"
            ]
        );
    }

    #[test]
    fn test_duplicate_target_rejected() {
        let result = load_from_str(
            r#"
            [[files]]
            source = "one"
            target = "/tmp/confsync-test/.zshrc"

            [[files]]
            source = "two"
            target = "/tmp/confsync-test/.zshrc"
        "#,
        );

        let err = result.unwrap_err();
        assert!(err.to_string().contains("duplicate target"));
    }

    #[test]
    fn test_os_filter_only_on() {
        let manifest = load_from_str(&format!(
            r#"
            [[files]]
            source = "here"
            target = "/tmp/confsync-test/here"
            only_on = ["{}"]

            [[files]]
            source = "elsewhere"
            target = "/tmp/confsync-test/elsewhere"
            only_on = ["plan9"]
        "#,
            std::env::consts::OS
        ))
        .unwrap();

        assert_eq!(manifest.files.len(), 1);
        assert_eq!(manifest.files[0].display_name, "/tmp/confsync-test/here");
        // filtered entries still count as declared sources
        assert_eq!(manifest.declared_sources.len(), 2);
    }

    #[test]
    fn test_os_filter_skip_on() {
        let manifest = load_from_str(&format!(
            r#"
            [[files]]
            source = "skipped"
            target = "/tmp/confsync-test/skipped"
            skip_on = ["{}"]
        "#,
            std::env::consts::OS
        ))
        .unwrap();

        assert!(manifest.files.is_empty());
    }

    #[test]
    fn test_tilde_expansion() {
        let Some(home) = dirs::home_dir() else {
            return;
        };

        let target = expand_target("~/.zshrc").unwrap();
        assert_eq!(target, home.join(".zshrc"));

        let bare = expand_target("~").unwrap();
        assert_eq!(bare, home);

        // no leading tilde, no expansion
        let plain = expand_target("/etc/motd").unwrap();
        assert_eq!(plain, PathBuf::from("/etc/motd"));
    }

    #[test]
    fn test_missing_root_is_config_error() {
        let err = Manifest::load(Path::new("/nonexistent/confsync-root")).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("configuration root"));
    }

    #[test]
    fn test_missing_manifest_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = Manifest::load(temp_dir.path()).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_malformed_manifest_is_config_error() {
        let err = load_from_str("this is not toml [[[").unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
