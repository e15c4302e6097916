//! Error types for pack-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from the selection core
    #[error(transparent)]
    Select(#[from] pack_select::Error),

    /// Error from repository access
    #[error(transparent)]
    Git(#[from] pack_git::Error),

    /// Error from archive writing
    #[error(transparent)]
    Archive(#[from] pack_archive::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
