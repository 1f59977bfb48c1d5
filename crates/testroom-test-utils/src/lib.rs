//! Shared test utilities for the testroom workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: sample Checkly and Playwright config documents
//! - [`workspace`]: [`TestWorkspace`](workspace::TestWorkspace) builder with a
//!   workspace root and an origin directory side by side

pub mod fixtures;
pub mod workspace;
