//! Error types for pack-git

/// Result type for pack-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading repository data
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("'{refspec}' does not name a commit")]
    BadRevision { refspec: String },

    #[error("path '{path}' is not tracked at the target commit")]
    PathNotFound { path: String },

    #[error("manifest '{path}' not found in the target commit")]
    ManifestNotFound { path: String },

    #[error("'{path}' is not valid UTF-8")]
    NotUtf8 { path: String },
}
