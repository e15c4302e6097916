//! Error types for pack-archive

use std::path::PathBuf;

/// Result type for archive operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while writing an archive
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("output archive {} already exists and overwriting is not enabled", path.display())]
    OutputExists { path: PathBuf },
}
