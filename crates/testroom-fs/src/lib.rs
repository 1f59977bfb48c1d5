//! Filesystem primitives for testroom
//!
//! Provides forward-slash path handling, atomic text writes, mtime-preserving
//! copies and a small format-agnostic config store used for durable state.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::WorkspacePath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
