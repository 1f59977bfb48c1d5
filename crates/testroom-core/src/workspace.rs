//! Workspace facade
//!
//! A [`Workspace`] is an explicit handle on one project root: its config, its
//! durable state and its two config documents. Every operation reads what it
//! needs from disk and writes whole documents back; nothing is cached across
//! calls.

use std::path::Path;

use serde::Serialize;
use testroom_fs::{NormalizedPath, io};
use testroom_patch as patch;

use crate::config::WorkspaceConfig;
use crate::email::validate_email;
use crate::mirror::{MirrorSync, SyncReport};
use crate::state::{AlertChannelConfig, MirrorState, StateStore};
use crate::{Error, Result};

/// Outcome of one reconcile step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum StepOutcome {
    Changed,
    Unchanged,
    /// The step had no stored state to apply
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileStep {
    pub name: &'static str,
    pub outcome: StepOutcome,
}

/// Report from [`Workspace::reconcile`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub steps: Vec<ReconcileStep>,
}

impl ReconcileReport {
    pub fn is_success(&self) -> bool {
        !self
            .steps
            .iter()
            .any(|step| matches!(step.outcome, StepOutcome::Failed(_)))
    }

    fn push(&mut self, name: &'static str, result: Result<bool>) {
        let outcome = match result {
            Ok(true) => StepOutcome::Changed,
            Ok(false) => StepOutcome::Unchanged,
            Err(e) => {
                tracing::warn!(step = name, error = %e, "Reconcile step failed");
                StepOutcome::Failed(e.to_string())
            }
        };
        self.steps.push(ReconcileStep { name, outcome });
    }

    fn skip(&mut self, name: &'static str) {
        self.steps.push(ReconcileStep {
            name,
            outcome: StepOutcome::Skipped,
        });
    }
}

/// Handle on a testroom workspace rooted at a project directory.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: NormalizedPath,
    config: WorkspaceConfig,
    state: StateStore,
    mirror: MirrorSync,
}

impl Workspace {
    /// Open the workspace at `root`, loading `.testroom/config.toml` if present.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` cannot be resolved or the config file is
    /// malformed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = NormalizedPath::canonicalize(root.as_ref())
            .map_err(|e| testroom_fs::Error::io(root.as_ref(), e))?;
        let config = WorkspaceConfig::load(&root)?;
        Ok(Self::with_config(root, config))
    }

    /// Build a workspace from an already-resolved root and config.
    pub fn with_config(root: NormalizedPath, config: WorkspaceConfig) -> Self {
        Self {
            state: StateStore::new(root.clone()),
            mirror: MirrorSync::new(root.clone()),
            root,
            config,
        }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn checkly_config_path(&self) -> NormalizedPath {
        self.root.join(&self.config.checkly_config)
    }

    pub fn playwright_config_path(&self) -> NormalizedPath {
        self.root.join(&self.config.playwright_config)
    }

    // --- Mirror -----------------------------------------------------------

    /// Select `origin`, materialize its mirror under the root and persist the
    /// mapping, replacing any earlier one.
    pub fn select_origin(&self, origin: impl AsRef<Path>) -> Result<(MirrorState, SyncReport)> {
        let (state, report) = self.mirror.select_origin(origin)?;
        self.state.save_mirror(&state)?;
        tracing::info!(origin = %state.origin_path, mirror = %state.mirror_path, "Selected origin");
        Ok((state, report))
    }

    /// Sync an explicit mirror state.
    pub fn sync(&self, state: &MirrorState) -> Result<SyncReport> {
        self.mirror.sync(state)
    }

    /// Sync the persisted mirror state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConfigured`] if no origin has been selected.
    pub fn sync_stored(&self) -> Result<SyncReport> {
        let state = self.mirror_state()?.ok_or(Error::NotConfigured)?;
        self.sync(&state)
    }

    pub fn mirror_state(&self) -> Result<Option<MirrorState>> {
        self.state.load_mirror()
    }

    /// Forget the mirror mapping. Mirrored files stay on disk.
    pub fn clear_mirror(&self) -> Result<bool> {
        self.state.clear_mirror()
    }

    // --- Documents --------------------------------------------------------

    /// Point `checkMatch` and `testMatch` in the Checkly config at `mirror`.
    ///
    /// Returns whether the document changed.
    pub fn update_path_fields(&self, mirror: &NormalizedPath) -> Result<bool> {
        let extension = &self.config.extension;
        self.patch_document(&self.checkly_config_path(), |doc| {
            patch::update_path_fields(doc, mirror, extension)
        })
    }

    /// Point `testDir` in the Playwright config at `mirror`.
    pub fn update_test_dir(&self, mirror: &NormalizedPath) -> Result<bool> {
        self.patch_document(&self.playwright_config_path(), |doc| {
            patch::update_test_dir(doc, mirror)
        })
    }

    // --- Alert channel ----------------------------------------------------

    /// Wire `email` into the Checkly config and store it for later
    /// reconciliation.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidEmail`] for a malformed address
    /// - [`Error::Patch`] when the document has no `checks` object or already
    ///   declares a channel for another address
    pub fn upsert_alert_channel(&self, email: &str) -> Result<bool> {
        let email = validate_email(email.trim())?;
        let changed = self.patch_document(&self.checkly_config_path(), |doc| {
            patch::upsert_alert_channel(doc, email)
        })?;
        self.state.save_alert_channel(&AlertChannelConfig {
            address: email.to_string(),
        })?;
        Ok(changed)
    }

    /// Unwire the alert channel and forget the stored address.
    pub fn remove_alert_channel(&self) -> Result<bool> {
        let changed = self.patch_document(&self.checkly_config_path(), |doc| {
            Ok(patch::remove_alert_channel(doc))
        })?;
        self.state.clear_alert_channel()?;
        Ok(changed)
    }

    pub fn stored_email(&self) -> Result<Option<String>> {
        Ok(self.state.load_alert_channel()?.map(|c| c.address))
    }

    // --- Reconcile --------------------------------------------------------

    /// Re-apply stored state to both documents.
    ///
    /// Steps run independently: path fields and `testDir` from the mirror
    /// mapping, then the alert channel from the stored address. A failing step
    /// is reported and the remaining steps still run.
    pub fn reconcile(&self) -> Result<ReconcileReport> {
        let mut report = ReconcileReport::default();

        match self.mirror_state()? {
            Some(state) => {
                report.push("path_fields", self.update_path_fields(&state.mirror_path));
                report.push("test_dir", self.update_test_dir(&state.mirror_path));
            }
            None => {
                report.skip("path_fields");
                report.skip("test_dir");
            }
        }

        match self.stored_email()? {
            Some(email) => report.push("alert_channel", self.upsert_alert_channel(&email)),
            None => report.skip("alert_channel"),
        }

        Ok(report)
    }

    /// Read `path`, apply `edit` and write the result back if it differs.
    ///
    /// A failed edit leaves the file untouched.
    fn patch_document<F>(&self, path: &NormalizedPath, edit: F) -> Result<bool>
    where
        F: FnOnce(&str) -> patch::Result<String>,
    {
        let original = io::read_text(path)?;
        let updated = edit(&original).map_err(|source| Error::Patch {
            path: path.to_native(),
            source,
        })?;

        if updated == original {
            tracing::debug!(path = %path, "Document already up to date");
            return Ok(false);
        }

        io::write_text(path, &updated)?;
        tracing::info!(path = %path, "Rewrote document");
        Ok(true)
    }
}
