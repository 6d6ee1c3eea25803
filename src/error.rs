use thiserror::Error;

/// Unified error type for release-manager operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git operation failed: {0}")]
    Repository(#[from] git2::Error),

    #[error("Version parsing error: {0}")]
    VersionParse(String),

    #[error("Tag conflict: {0}")]
    TagConflict(String),

    #[error("Push failed: {0}")]
    Push(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-manager
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a version parsing error with context
    pub fn version_parse(msg: impl Into<String>) -> Self {
        ReleaseError::VersionParse(msg.into())
    }

    /// Create a tag conflict error with context
    pub fn tag_conflict(msg: impl Into<String>) -> Self {
        ReleaseError::TagConflict(msg.into())
    }

    /// Create a push error with context
    pub fn push(msg: impl Into<String>) -> Self {
        ReleaseError::Push(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }
}
