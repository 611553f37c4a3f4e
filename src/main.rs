//! confsync CLI
//!
//! Command-line interface for synchronizing configuration files between a
//! canonical source tree and their deployed locations.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::apply::ApplyArgs;
use commands::check::CheckArgs;
use commands::diff::DiffArgs;
use commands::doctor::DoctorArgs;
use commands::init::InitArgs;
use commands::list::ListArgs;

#[derive(Parser)]
#[command(name = "confsync")]
#[command(
    author,
    version,
    about = "Keep deployed configuration files in sync with a canonical source tree"
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the sync status of every managed file
    Check(CheckArgs),

    /// Deploy canonical content to every managed target
    Apply(ApplyArgs),

    /// List the managed entries
    List(ListArgs),

    /// Show a unified diff for entries that are out of sync
    Diff(DiffArgs),

    /// Diagnose the configuration root and manifest
    Doctor(DoctorArgs),

    /// Create a configuration root with a starter manifest
    Init(InitArgs),
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => commands::check::run_check(args),
        Commands::Apply(args) => commands::apply::run_apply(args),
        Commands::List(args) => commands::list::run_list(args),
        Commands::Diff(args) => commands::diff::run_diff(args),
        Commands::Doctor(args) => commands::doctor::run_doctor(args),
        Commands::Init(args) => commands::init::run_init(args),
    }
}

/// Diagnostics go to stderr so stdout stays a clean line-oriented report.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
