use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use confsync::Manifest;
use confsync::apply::apply_all;

use super::resolve_root;

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Configuration root (default: the confsync directory under the
    /// user configuration directory)
    #[arg(long, env = "CONFSYNC_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,
}

pub fn run_apply(args: ApplyArgs) -> Result<()> {
    let root = resolve_root(args.config_dir)?;
    let manifest = Manifest::load(&root)?;

    let outcomes = apply_all(&manifest)?;
    let mut failures = 0usize;

    for outcome in &outcomes {
        match &outcome.result {
            Ok(()) => println!("\"{}\" {}", outcome.name, "applied".green()),
            Err(err) => {
                println!("\"{}\" {}: {}", outcome.name, "failed".red(), err);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
