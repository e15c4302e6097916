//! Deterministic tar.gz writing for gitpack
//!
//! Every entry carries an explicit mode and mtime supplied by the
//! caller; nothing is taken from the build environment, so the same
//! inputs produce the same bytes.

pub mod error;
pub mod writer;

pub use error::{Error, Result};
pub use writer::ArchiveWriter;

/// File extension of the archives this crate produces.
pub const ARCHIVE_EXTENSION: &str = "tar.gz";
