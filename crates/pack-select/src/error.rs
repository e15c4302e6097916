//! Error types for pack-select

/// Result type for selection operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compiling patterns, parsing manifests,
/// or resolving a selection
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("pattern '{spec}' ends with an unfinished escape")]
    TrailingEscape { spec: String },

    #[error("pattern '{spec}' has an unterminated character class")]
    UnterminatedClass { spec: String },

    #[error("pattern '{spec}' must be relative (leading '/' is not allowed)")]
    AbsolutePattern { spec: String },

    #[error("pattern '{spec}' did not compile: {source}")]
    Compile {
        spec: String,
        #[source]
        source: regex::Error,
    },

    #[error("manifest line {line}: tab characters are not allowed in rule lines")]
    TabInRule { line: usize },

    #[error("manifest line {line}: unknown directive '{keyword}'")]
    UnknownDirective { keyword: String, line: usize },

    #[error("manifest line {line}: '{keyword}' requires {wanted} filespec(s)")]
    MissingFilespecs {
        keyword: String,
        line: usize,
        wanted: usize,
    },

    #[error("invalid selector '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("selection matched no files")]
    EmptySelection,
}
