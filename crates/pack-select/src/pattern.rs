//! Wildcard filespec compilation
//!
//! Translates a manifest filespec into an anchored regex over
//! forward-slash relative paths. The grammar is not glob syntax
//! (escapes resolve here, `^` after `[` is a literal, `**` crosses
//! directory boundaries), so specs are walked character by character
//! in a single forward scan instead of being handed to a glob crate.

use regex::Regex;

use crate::{Error, Result};

/// A compiled predicate over a slash-separated relative path.
///
/// Matchers are anchored at both ends: a partial match is never a
/// selection hit. Once built, a matcher is a pure function of the
/// path string and can be reused in any order.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    spec: String,
    regex: Regex,
}

impl PathMatcher {
    /// Compiles a filespec that must match the entire path from the
    /// tree root (`include` / `exclude` directives).
    pub fn rooted(spec: &str) -> Result<Self> {
        let body = translate(spec)?;
        Self::from_parts(spec, format!("^{body}$"))
    }

    /// Compiles a filespec that matches at any depth below `dir`
    /// (`recursive-include` / `recursive-exclude` directives).
    ///
    /// Trailing slashes on `dir` are stripped; the parent must match
    /// a full leading segment chain, then any run of intermediate
    /// directories, then the filespec.
    pub fn under(dir: &str, spec: &str) -> Result<Self> {
        let dir = dir.trim_end_matches('/');
        let parent = translate(dir)?;
        let child = translate(spec)?;
        Self::from_parts(spec, format!("^{parent}/(?:[^/]+/)*{child}$"))
    }

    /// Compiles a filespec that matches its final path component(s)
    /// anywhere in the hierarchy (`global-include` / `global-exclude`
    /// directives).
    pub fn anywhere(spec: &str) -> Result<Self> {
        let body = translate(spec)?;
        Self::from_parts(spec, format!("^(?:.*/)?{body}$"))
    }

    /// Compiles a matcher covering every path under `dir`
    /// (`graft` / `prune` directives).
    pub fn subtree(dir: &str) -> Result<Self> {
        let trimmed = dir.trim_end_matches('/');
        let parent = translate(trimmed)?;
        Self::from_parts(dir, format!("^{parent}/.*$"))
    }

    /// Returns whether `path` is selected by this matcher.
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Returns the filespec text this matcher was compiled from.
    pub fn spec(&self) -> &str {
        &self.spec
    }

    fn from_parts(spec: &str, pattern: String) -> Result<Self> {
        let regex = Regex::new(&pattern).map_err(|source| Error::Compile {
            spec: spec.to_string(),
            source,
        })?;
        Ok(Self {
            spec: spec.to_string(),
            regex,
        })
    }
}

/// Translates one wildcard filespec into a regex fragment.
///
/// Single forward scan; all parser state (position, open class) is
/// local to this function, so compiled matchers share nothing.
fn translate(spec: &str) -> Result<String> {
    if spec.starts_with('/') {
        return Err(Error::AbsolutePattern {
            spec: spec.to_string(),
        });
    }

    let mut out = String::new();
    let mut chars = spec.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                None => {
                    return Err(Error::TrailingEscape {
                        spec: spec.to_string(),
                    });
                }
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(lit) => push_literal(&mut out, lit),
            },
            '*' => {
                let mut run = 1;
                while chars.peek() == Some(&'*') {
                    chars.next();
                    run += 1;
                }
                // A single star stops at directory boundaries; a
                // doubled star crosses them.
                if run > 1 {
                    out.push_str(".*");
                } else {
                    out.push_str("[^/]*");
                }
            }
            '?' => out.push_str("[^/]"),
            '[' => out.push_str(&translate_class(spec, &mut chars)?),
            other => push_literal(&mut out, other),
        }
    }

    Ok(out)
}

/// Consumes a character class body (everything after `[` up to the
/// closing `]`) and renders it as a regex class.
///
/// In this grammar `^` right after `[` is an ordinary member, never
/// negation, and a `]` appearing as the very first member is literal
/// (so `[]]` matches `]`). A class that never closes is malformed.
fn translate_class(
    spec: &str,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<String> {
    let mut class = String::from("[");
    let mut first = true;
    let mut closed = false;

    while let Some(member) = chars.next() {
        if member == ']' && !first {
            closed = true;
            break;
        }
        // A `-` between two members stays a range; every other
        // punctuation member is escaped so it reads as a literal.
        let range_dash =
            member == '-' && !first && chars.peek().is_some_and(|next| *next != ']');
        if member.is_ascii_punctuation() && !range_dash {
            class.push('\\');
        }
        class.push(member);
        first = false;
    }

    if !closed {
        return Err(Error::UnterminatedClass {
            spec: spec.to_string(),
        });
    }

    class.push(']');
    Ok(class)
}

fn push_literal(out: &mut String, ch: char) {
    // Escaped ASCII punctuation is always literal to the regex
    // engine; everything else is literal as-is.
    if ch.is_ascii_punctuation() {
        out.push('\\');
    }
    out.push(ch);
}
