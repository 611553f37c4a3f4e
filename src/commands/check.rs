use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use confsync::status::{SyncStatus, check_all};
use confsync::Manifest;

use super::resolve_root;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Configuration root (default: the confsync directory under the
    /// user configuration directory)
    #[arg(long, env = "CONFSYNC_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Output machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct JsonEntry {
    name: String,
    status: Option<SyncStatus>,
    error: Option<String>,
}

pub fn run_check(args: CheckArgs) -> Result<()> {
    let root = resolve_root(args.config_dir)?;
    let manifest = Manifest::load(&root)?;

    let entries = check_all(&manifest)?;
    let mut problems = 0usize;

    if args.json {
        let report: Vec<JsonEntry> = entries
            .into_iter()
            .map(|entry| match entry.outcome {
                Ok(status) => JsonEntry {
                    name: entry.name,
                    status: Some(status),
                    error: None,
                },
                Err(err) => {
                    problems += 1;
                    JsonEntry {
                        name: entry.name,
                        status: None,
                        error: Some(err.to_string()),
                    }
                }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for entry in &entries {
            match &entry.outcome {
                Ok(status) => {
                    let phrase = match status {
                        SyncStatus::UpToDate => status.phrase().green(),
                        SyncStatus::Stale => status.phrase().red(),
                        SyncStatus::Missing => status.phrase().yellow(),
                    };
                    println!("\"{}\" {}", entry.name, phrase);
                }
                Err(err) => {
                    println!("\"{}\" cannot be checked: {}", entry.name, err);
                    problems += 1;
                }
            }
        }
    }

    if problems > 0 {
        std::process::exit(1);
    }
    Ok(())
}
