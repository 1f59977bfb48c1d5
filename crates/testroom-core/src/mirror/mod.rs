//! One-way, staleness-aware directory mirroring
//!
//! - [`MirrorSync::select_origin`]: compute the mirror location for an origin
//!   and materialize it with an unconditional copy
//! - [`MirrorSync::sync`]: copy only files that are missing from the mirror or
//!   older there than in the origin
//!
//! Mirroring is additive. Files removed from the origin, and files that only
//! exist in the mirror, are left alone.

mod engine;
mod report;

pub use engine::MirrorSync;
pub use report::{SyncFailure, SyncReport};
