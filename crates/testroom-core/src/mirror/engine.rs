//! MirrorSync implementation

use std::fs;
use std::path::{Path, PathBuf};

use testroom_fs::{NormalizedPath, io};
use walkdir::WalkDir;

use super::report::SyncReport;
use crate::state::MirrorState;
use crate::{Error, Result};

/// How a pass decides whether to copy a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CopyPolicy {
    /// Overwrite every destination file (first materialization)
    Always,
    /// Copy only when the mirror copy is absent or strictly older
    IfStale,
}

/// Engine that mirrors an origin directory into the workspace root.
///
/// The engine holds no mapping of its own; callers pass the [`MirrorState`]
/// in and persist whatever [`MirrorSync::select_origin`] returns.
#[derive(Debug, Clone)]
pub struct MirrorSync {
    /// Workspace root that mirrors are created under
    root: NormalizedPath,
}

impl MirrorSync {
    pub fn new(root: NormalizedPath) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Compute the state for `origin` without touching the filesystem
    /// beyond validation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOrigin`] when `origin` is not an existing
    /// directory or has no final path component to name the mirror after.
    pub fn plan(&self, origin: impl AsRef<Path>) -> Result<MirrorState> {
        let origin = origin.as_ref();
        let invalid = |reason: &str| Error::InvalidOrigin {
            path: origin.to_path_buf(),
            reason: reason.to_string(),
        };

        if !origin.is_dir() {
            return Err(invalid("not an existing directory"));
        }

        let origin_path = NormalizedPath::canonicalize(origin)
            .map_err(|e| invalid(&format!("cannot resolve path: {}", e)))?;
        let name = origin_path
            .file_name()
            .ok_or_else(|| invalid("has no directory name to mirror under"))?;
        let mirror_path = self.root.join(name);

        Ok(MirrorState {
            origin_path,
            mirror_path,
        })
    }

    /// Select `origin` and materialize its mirror, overwriting every file.
    ///
    /// Files left in the mirror directory by an earlier selection are kept.
    pub fn select_origin(&self, origin: impl AsRef<Path>) -> Result<(MirrorState, SyncReport)> {
        let state = self.plan(origin)?;
        let report = self.bootstrap(&state)?;
        Ok((state, report))
    }

    /// Copy every origin file into the mirror unconditionally.
    pub fn bootstrap(&self, state: &MirrorState) -> Result<SyncReport> {
        self.pass(state, CopyPolicy::Always)
    }

    /// Copy origin files that are missing from the mirror or whose origin
    /// mtime is strictly newer than the mirror's.
    ///
    /// # Errors
    ///
    /// - [`Error::NotConfigured`] when either path of `state` is unset; no
    ///   I/O happens in that case.
    /// - [`Error::InvalidOrigin`] when the origin no longer exists.
    ///
    /// Per-file failures are recorded in the report and do not abort the walk.
    pub fn sync(&self, state: &MirrorState) -> Result<SyncReport> {
        self.pass(state, CopyPolicy::IfStale)
    }

    fn pass(&self, state: &MirrorState, policy: CopyPolicy) -> Result<SyncReport> {
        if !state.is_configured() {
            return Err(Error::NotConfigured);
        }

        let origin = state.origin_path.to_native();
        let mirror = state.mirror_path.to_native();

        if !origin.is_dir() {
            return Err(Error::InvalidOrigin {
                path: origin,
                reason: "not an existing directory".to_string(),
            });
        }

        let mut report = SyncReport::default();

        if same_location(&origin, &mirror) {
            tracing::info!(origin = %state.origin_path, "Origin is the mirror itself; nothing to copy");
            return Ok(report);
        }

        // Symlinked files and directories are mirrored as their targets.
        // The mirror may live inside the origin when the workspace root is
        // selected; never walk into it.
        let walker = WalkDir::new(&origin)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.path() != mirror);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(|p| relative_to(p, &origin))
                        .unwrap_or_else(|| NormalizedPath::new(""));
                    report.record_failure(path, e);
                    continue;
                }
            };

            let relative = relative_to(entry.path(), &origin);
            let target = match entry.path().strip_prefix(&origin) {
                Ok(rel) if rel.as_os_str().is_empty() => mirror.clone(),
                Ok(rel) => mirror.join(rel),
                Err(_) => continue,
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                if let Err(e) = fs::create_dir_all(&target) {
                    report.record_failure(relative, e);
                }
                continue;
            }
            if !file_type.is_file() {
                report.record_failure(relative, "not a regular file");
                continue;
            }

            let copy = match policy {
                CopyPolicy::Always => Ok(true),
                CopyPolicy::IfStale => is_stale(entry.path(), &target),
            };

            match copy {
                Ok(true) => match io::copy_with_mtime(entry.path(), &target) {
                    Ok(()) => {
                        tracing::debug!(path = %relative, "Copied");
                        report.copied.push(relative);
                    }
                    Err(e) => report.record_failure(relative, e),
                },
                Ok(false) => {
                    tracing::trace!(path = %relative, "Up to date");
                    report.up_to_date += 1;
                }
                Err(e) => report.record_failure(relative, e),
            }
        }

        tracing::info!(
            origin = %state.origin_path,
            mirror = %state.mirror_path,
            ?policy,
            copied = report.copied.len(),
            up_to_date = report.up_to_date,
            failed = report.failed.len(),
            "Mirror pass finished"
        );
        Ok(report)
    }
}

/// A mirror file is stale when absent or strictly older than the origin file.
fn is_stale(origin_file: &Path, mirror_file: &Path) -> testroom_fs::Result<bool> {
    let Some(mirror_mtime) = io::modified_time(mirror_file)? else {
        return Ok(true);
    };
    let origin_mtime = io::modified_time(origin_file)?;
    Ok(origin_mtime.is_some_and(|origin_mtime| origin_mtime > mirror_mtime))
}

fn relative_to(path: &Path, base: &Path) -> NormalizedPath {
    NormalizedPath::new(path.strip_prefix(base).unwrap_or(path))
}

/// Compare two paths after resolving them; paths that do not exist yet are
/// compared as given.
fn same_location(a: &Path, b: &Path) -> bool {
    let resolve = |p: &Path| -> PathBuf {
        NormalizedPath::canonicalize(p)
            .map(|p| p.to_native())
            .unwrap_or_else(|_| p.to_path_buf())
    };
    resolve(a) == resolve(b)
}
