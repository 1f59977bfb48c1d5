//! Alert channel commands

use std::path::Path;

use colored::Colorize;
use dialoguer::Input;
use testroom_core::{Workspace, validate_email};

use crate::error::Result;

fn prompt_email(default: Option<String>) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt("Alert email address")
        .validate_with(|value: &String| -> std::result::Result<(), String> {
            validate_email(value.trim())
                .map(|_| ())
                .map_err(|e| e.to_string())
        });
    if let Some(default) = default {
        input = input.default(default);
    }
    Ok(input.interact_text()?)
}

/// Run the alert add command
pub fn run_alert_add(root: &Path, email: Option<String>) -> Result<()> {
    let workspace = Workspace::open(root)?;
    let email = match email {
        Some(email) => email,
        None => prompt_email(workspace.stored_email()?)?,
    };

    let changed = workspace.upsert_alert_channel(&email)?;
    if changed {
        println!(
            "{} Alerts for {} wired into {}",
            "OK".green().bold(),
            email.trim().cyan(),
            workspace.config().checkly_config
        );
    } else {
        println!("{} Alert channel already wired.", "OK".green().bold());
    }
    Ok(())
}

/// Run the alert remove command
pub fn run_alert_remove(root: &Path) -> Result<()> {
    let workspace = Workspace::open(root)?;
    if workspace.remove_alert_channel()? {
        println!(
            "{} Removed alert channel from {}",
            "OK".green().bold(),
            workspace.config().checkly_config
        );
    } else {
        println!("No alert channel was wired.");
    }
    Ok(())
}
