//! Workspace configuration
//!
//! Loaded from the optional `.testroom/config.toml`. Every key has a default,
//! so a workspace without the file behaves like a stock Checkly + Playwright
//! TypeScript project.

use serde::{Deserialize, Serialize};
use testroom_fs::{ConfigStore, NormalizedPath, WorkspacePath};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Checkly config document, relative to the workspace root
    pub checkly_config: String,
    /// Playwright config document, relative to the workspace root
    pub playwright_config: String,
    /// Extension used in the `*.check.<ext>` and `*.spec.<ext>` globs
    pub extension: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            checkly_config: "checkly.config.ts".to_string(),
            playwright_config: "playwright.config.ts".to_string(),
            extension: "ts".to_string(),
        }
    }
}

impl WorkspaceConfig {
    /// Load the config for the workspace at `root`, falling back to defaults
    /// when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let path = root.join(WorkspacePath::ConfigFile.as_str());
        let config = ConfigStore::new().load_optional(&path)?;
        if config.is_some() {
            tracing::debug!(path = %path, "Loaded workspace config");
        }
        Ok(config.unwrap_or_default())
    }
}
