//! testroom CLI
//!
//! Thin front end over `testroom-core`: every subcommand maps to one
//! workspace operation.

mod cli;
mod commands;
mod error;
mod logging;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use cli::{AlertAction, Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialise logging: {}", "warning".yellow(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Some(cmd) => execute_command(root, cmd),
        None => {
            println!("{} testroom", "testroom".green().bold());
            println!();
            println!("Run {} for available commands.", "testroom --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(root: PathBuf, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Select { path } => commands::run_select(&root, &path),
        Commands::Sync { json } => commands::run_sync(&root, json),
        Commands::Status { json } => commands::run_status(&root, json),
        Commands::Clear => commands::run_clear(&root),
        Commands::Paths => commands::run_paths(&root),
        Commands::Alert { action } => match action {
            AlertAction::Add { email } => commands::run_alert_add(&root, email),
            AlertAction::Remove => commands::run_alert_remove(&root),
        },
        Commands::Reconcile { json } => commands::run_reconcile(&root, json),
    }
}
