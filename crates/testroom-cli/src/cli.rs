//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// testroom - Mirror a test folder into your project and keep its configs wired
#[derive(Parser, Debug)]
#[command(name = "testroom")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Workspace root (defaults to the current directory)
    #[arg(long, global = true, env = "TESTROOM_ROOT")]
    pub root: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Select an origin directory and mirror it into the workspace
    ///
    /// The mirror is created next to the config files, named after the
    /// origin directory. Every file is copied, overwriting existing copies.
    ///
    /// Examples:
    ///   testroom select ../shared-suites/e2e
    Select {
        /// Directory holding the test files
        path: PathBuf,
    },

    /// Copy new and changed origin files into the mirror
    Sync {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the tracked mirror and alert address
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Forget the tracked mirror (files stay on disk)
    Clear,

    /// Point checkMatch, testMatch and testDir at the mirror
    Paths,

    /// Manage the email alert channel
    Alert {
        #[command(subcommand)]
        action: AlertAction,
    },

    /// Re-apply the stored mirror and alert channel to both config files
    Reconcile {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

/// Alert channel actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum AlertAction {
    /// Wire an email alert channel into the Checkly config
    ///
    /// Prompts for the address when it is omitted.
    Add {
        /// Address to notify
        email: Option<String>,
    },

    /// Remove the alert channel and forget the stored address
    Remove,
}
