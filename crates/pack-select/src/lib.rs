//! Manifest-driven file selection for gitpack
//!
//! Turns manifest directives (include/exclude, recursive and global
//! variants, graft/prune) into compiled path matchers and applies an
//! ordered rule list to a flat candidate path listing. Pure
//! computation over relative path strings; no filesystem or git
//! access happens here.

pub mod error;
pub mod manifest;
pub mod pattern;
pub mod resolver;

pub use error::{Error, Result};
pub use manifest::{Directive, Rule, parse_manifest};
pub use pattern::PathMatcher;
pub use resolver::{ExplicitName, Selection, resolve};
