//! Git repository access for gitpack
//!
//! Everything the selection core treats as an external collaborator:
//! commit resolution, tracked-file listing, blob reads, versioned
//! manifest lookup, and the deterministic per-path timestamp rule.

pub mod error;
pub mod repo;
pub mod timestamps;

pub use error::{Error, Result};
pub use git2::Oid;
pub use repo::{FileMode, Repo, TreeEntry};
pub use timestamps::timestamp_for_path;
