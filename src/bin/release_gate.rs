//! Release gate for publication tooling.
//!
//! Compares the crate version declared in a Cargo.toml against a proposed
//! release tag and exits successfully only when the declared version is
//! strictly greater, so a release can never reuse or regress a tag.

use anyhow::{Context, Result};
use clap::Parser;
use semver::Version;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "confsync-release-gate")]
#[command(
    version,
    about = "Exit 0 only if the declared crate version supersedes the proposed release tag"
)]
struct Args {
    /// Proposed release tag (e.g. 0.3.0 or v0.3.0)
    tag: String,

    /// Path to the Cargo.toml carrying the declared version
    #[arg(long, default_value = "Cargo.toml")]
    manifest_path: PathBuf,
}

#[derive(Deserialize)]
struct CargoManifest {
    package: Package,
}

#[derive(Deserialize)]
struct Package {
    version: String,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let declared = declared_version(&args.manifest_path)?;
    let proposed = parse_tag(&args.tag)?;

    if declared > proposed {
        println!("{} supersedes {}", declared, proposed);
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "declared version {} does not supersede tag {}",
            declared, proposed
        );
        Ok(ExitCode::FAILURE)
    }
}

fn declared_version(manifest_path: &Path) -> Result<Version> {
    let content = fs::read_to_string(manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;

    let manifest: CargoManifest = toml::from_str(&content)
        .with_context(|| format!("failed to parse {}", manifest_path.display()))?;

    Version::parse(&manifest.package.version)
        .with_context(|| format!("invalid version in {}", manifest_path.display()))
}

fn parse_tag(tag: &str) -> Result<Version> {
    let trimmed = tag.strip_prefix('v').unwrap_or(tag);
    Version::parse(trimmed).with_context(|| format!("invalid release tag: {tag}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag_accepts_v_prefix() {
        assert_eq!(parse_tag("v1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(parse_tag("1.2.3").unwrap(), Version::new(1, 2, 3));
        assert!(parse_tag("not-a-version").is_err());
    }

    #[test]
    fn test_version_ordering() {
        let declared = Version::new(1, 3, 0);

        assert!(declared > parse_tag("1.2.9").unwrap());
        assert!(!(declared > parse_tag("1.3.0").unwrap()));
        assert!(!(declared > parse_tag("2.0.0").unwrap()));
    }

    #[test]
    fn test_declared_version_from_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manifest_path = temp_dir.path().join("Cargo.toml");
        fs::write(
            &manifest_path,
            "[package]\nname = \"demo\"\nversion = \"0.9.1\"\n",
        )
        .unwrap();

        assert_eq!(
            declared_version(&manifest_path).unwrap(),
            Version::new(0, 9, 1)
        );
    }
}
