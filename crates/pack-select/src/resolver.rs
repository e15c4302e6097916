//! Selection resolution
//!
//! Applies either an ordered manifest rule list or an explicit name
//! list to a flat candidate path listing. The two modes are mutually
//! exclusive by construction: `Selection` is an enum, so a caller can
//! never mix them.

use tracing::{debug, trace};

use crate::manifest::Rule;
use crate::{Error, Result};

/// One explicit selector: an exact file path or a directory prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplicitName {
    /// Matches the full candidate path exactly.
    File(String),
    /// Written with a trailing `/`; matches candidates under the
    /// directory at a path-segment boundary.
    DirPrefix(String),
}

impl ExplicitName {
    /// Parses and validates one selector as given on the command
    /// line. Absolute names and `.` / `..` components are rejected.
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(invalid(name, "empty selector"));
        }
        if name.starts_with('/') {
            return Err(invalid(name, "must be relative"));
        }

        let is_dir = name.ends_with('/');
        let body = name.trim_end_matches('/');
        if body.is_empty() {
            return Err(invalid(name, "names no path"));
        }
        for segment in body.split('/') {
            if segment.is_empty() {
                return Err(invalid(name, "empty path segment"));
            }
            if segment == "." || segment == ".." {
                return Err(invalid(name, "'.' and '..' segments are not allowed"));
            }
        }

        if is_dir {
            Ok(Self::DirPrefix(format!("{body}/")))
        } else {
            Ok(Self::File(name.to_string()))
        }
    }

    fn selects(&self, path: &str) -> bool {
        match self {
            Self::File(name) => path == name,
            // The stored prefix ends with '/', so a sibling sharing
            // the name as a string prefix cannot slip through.
            Self::DirPrefix(prefix) => path.starts_with(prefix.as_str()),
        }
    }
}

fn invalid(name: &str, reason: &str) -> Error {
    Error::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// The caller's file-selection rule set, in one of its two mutually
/// exclusive forms.
#[derive(Debug, Clone)]
pub enum Selection {
    /// Ordered manifest rules; the last matching rule wins.
    Manifest(Vec<Rule>),
    /// Union of explicit names; no precedence between them.
    Explicit(Vec<ExplicitName>),
}

impl Selection {
    /// Decides whether one candidate path is included.
    pub fn selects(&self, path: &str) -> bool {
        match self {
            Self::Manifest(rules) => {
                // Later directives override earlier ones, so scan
                // from the back; the first hit decides.
                for rule in rules.iter().rev() {
                    if rule.matcher.matches(path) {
                        trace!(path, spec = rule.matcher.spec(), include = rule.include, "rule hit");
                        return rule.include;
                    }
                }
                // An exclude-only manifest filters an implicitly
                // full tree; once any include directive appears,
                // unmatched paths stay out.
                !rules.iter().any(|rule| rule.include)
            }
            Self::Explicit(names) => names.iter().any(|name| name.selects(path)),
        }
    }
}

/// Computes the included subset of `candidates`, as indices into the
/// input slice in original order.
///
/// An empty result is a hard usage error: there would be nothing to
/// archive, and that must surface before any archive work starts.
pub fn resolve(selection: &Selection, candidates: &[impl AsRef<str>]) -> Result<Vec<usize>> {
    let included: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, path)| selection.selects(path.as_ref()))
        .map(|(idx, _)| idx)
        .collect();

    debug!(
        candidates = candidates.len(),
        included = included.len(),
        "resolved selection"
    );

    if included.is_empty() {
        return Err(Error::EmptySelection);
    }
    Ok(included)
}
