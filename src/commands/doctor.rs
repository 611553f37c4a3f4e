use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::collections::HashSet;
use std::path::PathBuf;
use walkdir::WalkDir;

use confsync::Manifest;
use confsync::config::MANIFEST_FILE_NAME;

use super::resolve_root;

/// Arguments for the doctor command
#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Configuration root (default: the confsync directory under the
    /// user configuration directory)
    #[arg(long, env = "CONFSYNC_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,
}

pub fn run_doctor(args: DoctorArgs) -> Result<()> {
    println!("{}", "Running confsync diagnostic...".bold().cyan());

    let mut issues = 0;

    // 1. Configuration Root & Manifest
    let root = resolve_root(args.config_dir)?;
    let manifest = match Manifest::load(&root) {
        Ok(manifest) => {
            println!(
                "  {} Manifest loaded: {}",
                "✔".green(),
                root.join(MANIFEST_FILE_NAME).display().to_string().dimmed()
            );
            manifest
        }
        Err(e) => {
            println!("  {} Could not load manifest: {}", "✗".red(), e);
            return Err(e.into());
        }
    };

    // 2. Canonical Source Existence
    for file in &manifest.files {
        if file.canonical_path.is_file() {
            continue;
        }
        println!(
            "  {} Missing canonical source for {}: {}",
            "✗".red(),
            file.display_name.bold(),
            file.canonical_path.display()
        );
        issues += 1;
    }
    if manifest.files.is_empty() {
        println!("  {} No managed entries declared", "·".dimmed());
    }

    // 3. Unmanaged Files in the Configuration Root
    let declared: HashSet<&PathBuf> = manifest.declared_sources.iter().collect();
    let manifest_path = root.join(MANIFEST_FILE_NAME);
    for entry in WalkDir::new(&root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path().to_path_buf();
        if path == manifest_path || declared.contains(&path) {
            continue;
        }
        println!(
            "  {} Unmanaged file in configuration root: {}",
            "⚠".yellow(),
            path.display()
        );
    }

    if issues > 0 {
        println!("\n{} {} issue(s) found", "✗".red(), issues);
        std::process::exit(1);
    }

    println!("\n{}", "No issues found".green());
    Ok(())
}
