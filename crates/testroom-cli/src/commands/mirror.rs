//! Select, sync, status and clear commands

use std::path::Path;

use colored::Colorize;
use serde_json::json;
use testroom_core::{SyncReport, Workspace};

use crate::error::Result;

fn print_report(report: &SyncReport) {
    for path in &report.copied {
        println!("   {} {}", "+".green(), path);
    }
    for failure in &report.failed {
        println!("   {} {}: {}", "!".red(), failure.path.as_str().cyan(), failure.reason);
    }
    println!("   {}", report.to_string().as_str().dimmed());
}

/// Run the select command
pub fn run_select(root: &Path, origin: &Path) -> Result<()> {
    let workspace = Workspace::open(root)?;
    let (state, report) = workspace.select_origin(origin)?;

    println!(
        "{} Mirroring {} -> {}",
        "=>".blue().bold(),
        state.origin_path.as_str().cyan(),
        state.mirror_path.as_str().cyan()
    );
    print_report(&report);
    println!();
    println!(
        "Run {} to point the configs at the mirror.",
        "testroom paths".cyan()
    );
    Ok(())
}

/// Run the sync command
pub fn run_sync(root: &Path, json: bool) -> Result<()> {
    let workspace = Workspace::open(root)?;
    let report = workspace.sync_stored()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.copied.is_empty() && report.is_clean() {
        println!("{} Mirror is up to date.", "OK".green().bold());
    } else {
        println!("{} Synced mirror:", "=>".blue().bold());
        print_report(&report);
    }
    Ok(())
}

/// Run the status command
pub fn run_status(root: &Path, json: bool) -> Result<()> {
    let workspace = Workspace::open(root)?;
    let mirror = workspace.mirror_state()?;
    let email = workspace.stored_email()?;

    if json {
        let value = json!({
            "root": workspace.root(),
            "mirror": mirror,
            "alert_email": email,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} {}", "Workspace:".bold(), workspace.root());
    match &mirror {
        Some(state) => {
            println!("{} {}", "Origin:   ".bold(), state.origin_path);
            println!("{} {}", "Mirror:   ".bold(), state.mirror_path);
        }
        None => println!("{} {}", "Mirror:   ".bold(), "not selected".dimmed()),
    }
    match &email {
        Some(email) => println!("{} {}", "Alerts:   ".bold(), email),
        None => println!("{} {}", "Alerts:   ".bold(), "none".dimmed()),
    }
    Ok(())
}

/// Run the clear command
pub fn run_clear(root: &Path) -> Result<()> {
    let workspace = Workspace::open(root)?;
    if workspace.clear_mirror()? {
        println!("{} Forgot mirror mapping; files were left in place.", "OK".green().bold());
    } else {
        println!("No mirror was selected.");
    }
    Ok(())
}
