//! Path-field and reconcile commands

use std::path::Path;

use colored::Colorize;
use testroom_core::{StepOutcome, Workspace};

use crate::error::{CliError, Result};

fn changed_label(changed: bool) -> colored::ColoredString {
    if changed {
        "updated".green()
    } else {
        "unchanged".dimmed()
    }
}

/// Run the paths command
pub fn run_paths(root: &Path) -> Result<()> {
    let workspace = Workspace::open(root)?;
    let state = workspace
        .mirror_state()?
        .ok_or(testroom_core::Error::NotConfigured)?;

    let checkly = workspace.update_path_fields(&state.mirror_path)?;
    println!(
        "   {} ({})",
        workspace.config().checkly_config.cyan(),
        changed_label(checkly)
    );

    let playwright = workspace.update_test_dir(&state.mirror_path)?;
    println!(
        "   {} ({})",
        workspace.config().playwright_config.cyan(),
        changed_label(playwright)
    );
    Ok(())
}

/// Run the reconcile command
pub fn run_reconcile(root: &Path, json: bool) -> Result<()> {
    let workspace = Workspace::open(root)?;
    let report = workspace.reconcile()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for step in &report.steps {
            let label = match &step.outcome {
                StepOutcome::Changed => "updated".green(),
                StepOutcome::Unchanged => "unchanged".dimmed(),
                StepOutcome::Skipped => "skipped".yellow(),
                StepOutcome::Failed(reason) => format!("failed: {}", reason).as_str().red(),
            };
            println!("   {} {}", step.name.cyan(), label);
        }
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::user("Reconcile finished with failures"))
    }
}
