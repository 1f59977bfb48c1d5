//! Outcome of a bootstrap or sync pass

use serde::Serialize;
use testroom_fs::NormalizedPath;

/// A file or directory that could not be mirrored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncFailure {
    /// Path relative to the origin
    pub path: NormalizedPath,
    pub reason: String,
}

/// Report from a bootstrap or sync pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Files copied into the mirror, relative to the origin
    pub copied: Vec<NormalizedPath>,
    /// Files whose mirror copy was already current
    pub up_to_date: usize,
    /// Per-file failures; these never abort the pass
    pub failed: Vec<SyncFailure>,
}

impl SyncReport {
    /// True when no entry failed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub(crate) fn record_failure(&mut self, path: NormalizedPath, reason: impl ToString) {
        let reason = reason.to_string();
        tracing::warn!(path = %path, %reason, "Skipping entry that could not be mirrored");
        self.failed.push(SyncFailure { path, reason });
    }
}

impl std::fmt::Display for SyncReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} copied, {} up to date, {} failed",
            self.copied.len(),
            self.up_to_date,
            self.failed.len()
        )
    }
}
