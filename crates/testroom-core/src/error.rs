//! Error types for testroom-core

use std::path::PathBuf;

/// Result type for testroom-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in testroom-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The selected origin is not an existing directory
    #[error("Invalid origin {path}: {reason}")]
    InvalidOrigin { path: PathBuf, reason: String },

    /// Sync was requested before an origin was selected
    #[error("No origin directory selected; select one before syncing")]
    NotConfigured,

    /// The alert-channel address failed the email shape check
    #[error("Invalid email address: {address:?}")]
    InvalidEmail { address: String },

    /// A config document could not be patched; it was left unmodified
    #[error("Failed to patch {path}: {source}")]
    Patch {
        path: PathBuf,
        #[source]
        source: testroom_patch::Error,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from testroom-fs
    #[error(transparent)]
    Fs(#[from] testroom_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
