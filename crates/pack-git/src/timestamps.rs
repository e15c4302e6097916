//! Deterministic per-path timestamps
//!
//! Archive entries carry the time of the last historical change to
//! the file, not the build time, so two builds from the same commit
//! come out byte-identical.

use std::path::Path;

use git2::{Commit, Oid, Repository, Sort};
use tracing::trace;

use crate::{Error, Result};

/// Returns the commit time (Unix seconds) of the most recent commit
/// reachable from `commit` that changed `path`, restricted to commits
/// strictly after the earliest reachable commit. When the file's only
/// appearance is that earliest commit, falls back to the most recent
/// changing commit with no lower bound, so every tracked path gets a
/// timestamp.
pub fn timestamp_for_path(repo: &Repository, path: &str, commit: Oid) -> Result<i64> {
    let mut revwalk = repo.revwalk()?;
    revwalk.push(commit)?;
    revwalk.set_sorting(Sort::TIME)?;

    // Newest first; materialized once so the earliest reachable time
    // is known before picking.
    let mut commits = Vec::new();
    for oid in revwalk {
        commits.push(repo.find_commit(oid?)?);
    }
    let earliest = commits
        .iter()
        .map(|c| c.time().seconds())
        .min()
        .unwrap_or(0);

    let target = Path::new(path);
    let mut unbounded = None;
    for c in &commits {
        if !changes_path(c, target) {
            continue;
        }
        let when = c.time().seconds();
        if when > earliest {
            trace!(path, commit = %c.id(), when, "timestamp from history");
            return Ok(when);
        }
        if unbounded.is_none() {
            unbounded = Some(when);
        }
    }

    // Genesis tier: the file only ever appeared in the earliest
    // commit(s).
    unbounded.ok_or_else(|| Error::PathNotFound {
        path: path.to_string(),
    })
}

/// Whether `commit` changed `path`: no parent tree carries an
/// identical (blob, filemode) entry for it, and a parentless commit
/// changes everything its tree contains.
fn changes_path(commit: &Commit<'_>, path: &Path) -> bool {
    let Some(current) = entry_of(commit, path) else {
        return false;
    };
    if commit.parent_count() == 0 {
        return true;
    }
    !commit
        .parents()
        .any(|parent| entry_of(&parent, path) == Some(current))
}

fn entry_of(commit: &Commit<'_>, path: &Path) -> Option<(Oid, i32)> {
    let tree = commit.tree().ok()?;
    let entry = tree.get_path(path).ok()?;
    Some((entry.id(), entry.filemode()))
}
