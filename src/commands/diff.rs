use anyhow::Result;
use clap::Args;
use colored::Colorize;
use similar::TextDiff;
use std::fs;
use std::path::PathBuf;

use confsync::status::canonical_content;
use confsync::{Manifest, SyncError};

use super::resolve_root;

/// Arguments for the diff command
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Configuration root (default: the confsync directory under the
    /// user configuration directory)
    #[arg(long, env = "CONFSYNC_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,
}

pub fn run_diff(args: DiffArgs) -> Result<()> {
    let root = resolve_root(args.config_dir)?;
    let manifest = Manifest::load(&root)?;

    for file in &manifest.files {
        let canonical = canonical_content(&manifest, file)?;

        if !file.target_path.exists() {
            println!("\"{}\" {}", file.display_name, "does not exist".yellow());
            continue;
        }

        let deployed = fs::read(&file.target_path).map_err(|e| SyncError::Access {
            path: file.target_path.clone(),
            source: e,
        })?;

        if deployed == canonical {
            continue;
        }

        let canonical_text = String::from_utf8_lossy(&canonical);
        let deployed_text = String::from_utf8_lossy(&deployed);

        let diff = TextDiff::from_lines(canonical_text.as_ref(), deployed_text.as_ref());
        let mut unified = diff.unified_diff();
        unified.header(
            &file.canonical_path.display().to_string(),
            &file.display_name,
        );
        print!("{}", unified);
    }

    Ok(())
}
