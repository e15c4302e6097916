//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// gitpack - Build a reproducible release archive from a git commit
///
/// Selects files from the commit's tree with a manifest or explicit
/// selectors and writes them to `<archive-base>-<commit>.tar.gz`,
/// stamping every entry with the time of its last historical change.
#[derive(Parser, Debug)]
#[command(name = "gitpack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Archive base name; its final path segment roots the entry
    /// paths inside the archive
    pub archive_base: String,

    /// Commit to archive (any revision git can resolve)
    pub commit: String,

    /// Explicit selectors: exact file paths, or directory prefixes
    /// written with a trailing '/'
    pub filespecs: Vec<String>,

    /// Read selection rules from a manifest file in the working tree
    #[arg(long, value_name = "PATH", conflicts_with = "commit_manifest")]
    pub manifest: Option<PathBuf>,

    /// Read selection rules from the manifest stored at PATH inside
    /// the target commit
    #[arg(long, value_name = "PATH")]
    pub commit_manifest: Option<String>,

    /// Overwrite the output archive if it already exists
    #[arg(long)]
    pub force: bool,

    /// Repository location (discovered from the current directory by
    /// default)
    #[arg(long, value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
