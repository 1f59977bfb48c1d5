//! Mirror sync and config reconciliation for testroom
//!
//! This crate ties the Layer 0 crates together:
//!
//! - **Mirror sync**: one-way, staleness-aware copying of an origin directory
//!   into a mirror directory under the workspace root
//! - **Durable state**: the origin/mirror mapping and the alert-channel
//!   address, each a single record under `.testroom/`
//! - **Workspace**: the operations callers use, applying the pure document
//!   patches from `testroom-patch` to the config files on disk
//!
//! ```text
//!              CLI / scripts
//!                    |
//!              testroom-core
//!                    |
//!        +-----------+-----------+
//!        |                       |
//!   testroom-fs           testroom-patch
//! ```
//!
//! # Example
//!
//! ```no_run
//! use testroom_core::Workspace;
//!
//! fn example() -> testroom_core::Result<()> {
//!     let workspace = Workspace::open(".")?;
//!     let (state, _report) = workspace.select_origin("../shared-suites/e2e")?;
//!     workspace.update_path_fields(&state.mirror_path)?;
//!     workspace.update_test_dir(&state.mirror_path)?;
//!     workspace.upsert_alert_channel("oncall@example.com")?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod email;
pub mod error;
pub mod mirror;
pub mod state;
pub mod workspace;

pub use config::WorkspaceConfig;
pub use email::validate_email;
pub use error::{Error, Result};
pub use mirror::{MirrorSync, SyncFailure, SyncReport};
pub use state::{AlertChannelConfig, MirrorState, StateStore};
pub use workspace::{ReconcileReport, ReconcileStep, StepOutcome, Workspace};
