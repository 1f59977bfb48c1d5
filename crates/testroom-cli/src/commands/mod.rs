//! Command implementations for testroom-cli

pub mod alert;
pub mod mirror;
pub mod paths;

pub use alert::{run_alert_add, run_alert_remove};
pub use mirror::{run_clear, run_select, run_status, run_sync};
pub use paths::{run_paths, run_reconcile};
