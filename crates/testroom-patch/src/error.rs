//! Error types for testroom-patch

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A field anchor is missing; the document is considered malformed.
    #[error("Field `{field}` not found (expected `{field}: '<value>'`)")]
    FieldNotFound { field: String },

    #[error("No `checks: {{ ... }}` object found")]
    ChecksBlockNotFound,

    #[error(
        "An alert channel is already declared for {existing}; remove it before adding {requested}"
    )]
    AlertChannelConflict { existing: String, requested: String },

    #[error("`checks` already has an `alertChannels` list that is not managed by testroom")]
    UnmanagedAlertChannels,
}
