//! Repository wrapper over git2
//!
//! Read-only access to the object database: no working-tree state is
//! consulted, so the same commit always yields the same listing.

use std::path::Path;

use git2::{ObjectType, Oid, Repository, TreeWalkMode, TreeWalkResult};
use tracing::{debug, warn};

use crate::timestamps;
use crate::{Error, Result};

/// File mode of a tracked entry. Symlinks and submodules never reach
/// the selection core; they are filtered during the tree walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    Regular,
    Executable,
}

impl FileMode {
    /// Unix permission bits for an archive entry with this mode.
    pub fn permission_bits(self) -> u32 {
        match self {
            Self::Regular => 0o644,
            Self::Executable => 0o755,
        }
    }
}

/// One tracked file at the target commit.
#[derive(Debug, Clone)]
pub struct TreeEntry {
    /// Forward-slash relative path, no leading slash.
    pub path: String,
    pub mode: FileMode,
    /// Content handle, resolved lazily via [`Repo::read_blob`].
    pub blob: Oid,
}

/// An opened repository.
pub struct Repo {
    inner: Repository,
}

impl Repo {
    /// Opens the repository containing `start`, walking up parent
    /// directories the way git itself does.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            inner: Repository::discover(start)?,
        })
    }

    /// Opens the repository at exactly `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            inner: Repository::open(path)?,
        })
    }

    /// Resolves any revision git understands (branch, tag, hash,
    /// `HEAD~2`, ...) to a commit id.
    pub fn resolve_commit(&self, refspec: &str) -> Result<Oid> {
        let object = self
            .inner
            .revparse_single(refspec)
            .map_err(|_| Error::BadRevision {
                refspec: refspec.to_string(),
            })?;
        let commit = object.peel_to_commit().map_err(|_| Error::BadRevision {
            refspec: refspec.to_string(),
        })?;
        Ok(commit.id())
    }

    /// Lists every tracked file in the commit's tree, in tree-walk
    /// order. Symlink and submodule entries are dropped here, before
    /// the selection core ever sees them.
    pub fn list_tracked_files(&self, commit: Oid) -> Result<Vec<TreeEntry>> {
        let tree = self.inner.find_commit(commit)?.tree()?;
        let mut entries = Vec::new();

        tree.walk(TreeWalkMode::PreOrder, |root, entry| {
            if entry.kind() != Some(ObjectType::Blob) {
                return TreeWalkResult::Ok;
            }
            let mode = match entry.filemode() {
                0o100644 | 0o100664 => FileMode::Regular,
                0o100755 => FileMode::Executable,
                // 0o120000 symlink; anything else is not archivable
                _ => return TreeWalkResult::Ok,
            };
            let Some(name) = entry.name() else {
                warn!(root, "skipping tree entry with non-UTF-8 name");
                return TreeWalkResult::Ok;
            };
            entries.push(TreeEntry {
                path: format!("{root}{name}"),
                mode,
                blob: entry.id(),
            });
            TreeWalkResult::Ok
        })?;

        debug!(commit = %commit, files = entries.len(), "listed tracked files");
        Ok(entries)
    }

    /// Reads the full content of a blob.
    pub fn read_blob(&self, blob: Oid) -> Result<Vec<u8>> {
        Ok(self.inner.find_blob(blob)?.content().to_vec())
    }

    /// Reads the manifest stored at `path` inside the target commit,
    /// letting the manifest be versioned alongside the code it
    /// selects.
    pub fn manifest_at(&self, commit: Oid, path: &str) -> Result<String> {
        let tree = self.inner.find_commit(commit)?.tree()?;
        let entry = tree
            .get_path(Path::new(path))
            .map_err(|_| Error::ManifestNotFound {
                path: path.to_string(),
            })?;
        let blob = self
            .inner
            .find_blob(entry.id())
            .map_err(|_| Error::ManifestNotFound {
                path: path.to_string(),
            })?;
        String::from_utf8(blob.content().to_vec()).map_err(|_| Error::NotUtf8 {
            path: path.to_string(),
        })
    }

    /// Deterministic timestamp for one tracked path; see
    /// [`timestamps::timestamp_for_path`].
    pub fn timestamp_for_path(&self, path: &str, commit: Oid) -> Result<i64> {
        timestamps::timestamp_for_path(&self.inner, path, commit)
    }
}
