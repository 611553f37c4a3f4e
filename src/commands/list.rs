use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use confsync::Manifest;

use super::resolve_root;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Configuration root (default: the confsync directory under the
    /// user configuration directory)
    #[arg(long, env = "CONFSYNC_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,
}

pub fn run_list(args: ListArgs) -> Result<()> {
    let root = resolve_root(args.config_dir)?;
    let manifest = Manifest::load(&root)?;

    for file in &manifest.files {
        println!("{}", file.display_name.bold());
        println!("  source: {}", file.canonical_path.display());
        if file.template {
            println!("  template: true");
        }
    }

    Ok(())
}
