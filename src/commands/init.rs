use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use confsync::config::MANIFEST_FILE_NAME;
use confsync::init::{InitOutcome, init};

use super::resolve_root;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Configuration root to create (default: the confsync directory
    /// under the user configuration directory)
    #[arg(long, env = "CONFSYNC_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Overwrite an existing manifest
    #[arg(short, long)]
    pub force: bool,
}

pub fn run_init(args: InitArgs) -> Result<()> {
    let root = resolve_root(args.config_dir)?;

    match init(&root, args.force)? {
        InitOutcome::Created => {
            println!(
                "{} {}",
                "Created".green(),
                root.join(MANIFEST_FILE_NAME).display()
            );
            println!(
                "\nNext steps:\n  1. Add your configuration files under {}\n  2. Declare them in {}\n  3. Run {} to deploy them",
                root.display().to_string().cyan(),
                MANIFEST_FILE_NAME.cyan(),
                "confsync apply".cyan()
            );
        }
        InitOutcome::AlreadyExists => {
            println!(
                "{} already exists (use --force to overwrite)",
                root.join(MANIFEST_FILE_NAME).display()
            );
        }
    }

    Ok(())
}
