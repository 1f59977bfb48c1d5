//! Well-known paths inside a testroom workspace, relative to its root.

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspacePath {
    /// Optional workspace configuration
    ConfigFile,
    /// Persisted origin/mirror mapping
    MirrorRecord,
    /// Persisted alert-channel address
    AlertRecord,
}

impl WorkspacePath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigFile => ".testroom/config.toml",
            Self::MirrorRecord => ".testroom/mirror.toml",
            Self::AlertRecord => ".testroom/alert.toml",
        }
    }
}

impl AsRef<Path> for WorkspacePath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for WorkspacePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for WorkspacePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
