//! Manifest directive parsing
//!
//! Reads manifest text line by line and expands each recognized
//! directive into one or more ordered selection rules. Rule order is
//! load-bearing: the resolver gives later rules precedence.

use tracing::debug;

use crate::pattern::PathMatcher;
use crate::{Error, Result};

/// One selection rule: an include/exclude flag plus a compiled
/// matcher. Rules have no identity beyond their list position.
#[derive(Debug, Clone)]
pub struct Rule {
    pub include: bool,
    pub matcher: PathMatcher,
}

impl Rule {
    pub fn include(matcher: PathMatcher) -> Self {
        Self {
            include: true,
            matcher,
        }
    }

    pub fn exclude(matcher: PathMatcher) -> Self {
        Self {
            include: false,
            matcher,
        }
    }
}

/// The closed set of manifest directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Include,
    Exclude,
    RecursiveInclude,
    RecursiveExclude,
    GlobalInclude,
    GlobalExclude,
    Graft,
    Prune,
}

impl Directive {
    fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "include" => Some(Self::Include),
            "exclude" => Some(Self::Exclude),
            "recursive-include" => Some(Self::RecursiveInclude),
            "recursive-exclude" => Some(Self::RecursiveExclude),
            "global-include" => Some(Self::GlobalInclude),
            "global-exclude" => Some(Self::GlobalExclude),
            "graft" => Some(Self::Graft),
            "prune" => Some(Self::Prune),
            _ => None,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Exclude => "exclude",
            Self::RecursiveInclude => "recursive-include",
            Self::RecursiveExclude => "recursive-exclude",
            Self::GlobalInclude => "global-include",
            Self::GlobalExclude => "global-exclude",
            Self::Graft => "graft",
            Self::Prune => "prune",
        }
    }

    /// Whether rules produced by this directive include files.
    pub fn is_include(self) -> bool {
        matches!(
            self,
            Self::Include | Self::RecursiveInclude | Self::GlobalInclude | Self::Graft
        )
    }

    /// Minimum number of filespec arguments the directive accepts.
    fn min_filespecs(self) -> usize {
        match self {
            Self::RecursiveInclude | Self::RecursiveExclude => 2,
            _ => 1,
        }
    }
}

/// Parses manifest text into an ordered rule list.
///
/// Lines are left-trimmed; blank lines and `#` comments produce no
/// rules. One line may expand to several rules (one per trailing
/// filespec), appended left to right.
pub fn parse_manifest(text: &str) -> Result<Vec<Rule>> {
    let mut rules = Vec::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim_start();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Checked on the raw line so a leading tab cannot hide
        // behind the left-trim.
        if raw_line.contains('\t') {
            return Err(Error::TabInRule { line: line_no });
        }

        let tokens = tokenize(line);
        let keyword = &tokens[0];
        let directive = Directive::parse(keyword).ok_or_else(|| Error::UnknownDirective {
            keyword: keyword.clone(),
            line: line_no,
        })?;

        let filespecs = &tokens[1..];
        if filespecs.len() < directive.min_filespecs() {
            return Err(Error::MissingFilespecs {
                keyword: directive.keyword().to_string(),
                line: line_no,
                wanted: directive.min_filespecs(),
            });
        }

        expand(directive, filespecs, &mut rules)?;
        debug!(
            line = line_no,
            keyword = directive.keyword(),
            rules = rules.len(),
            "parsed manifest directive"
        );
    }

    Ok(rules)
}

/// Appends the rules a single directive expands to.
fn expand(directive: Directive, filespecs: &[String], rules: &mut Vec<Rule>) -> Result<()> {
    let include = directive.is_include();
    match directive {
        Directive::Include | Directive::Exclude => {
            for spec in filespecs {
                push_rule(rules, include, PathMatcher::rooted(spec)?);
            }
        }
        Directive::RecursiveInclude | Directive::RecursiveExclude => {
            let dir = &filespecs[0];
            for spec in &filespecs[1..] {
                push_rule(rules, include, PathMatcher::under(dir, spec)?);
            }
        }
        Directive::GlobalInclude | Directive::GlobalExclude => {
            for spec in filespecs {
                push_rule(rules, include, PathMatcher::anywhere(spec)?);
            }
        }
        Directive::Graft | Directive::Prune => {
            for dir in filespecs {
                push_rule(rules, include, PathMatcher::subtree(dir)?);
            }
        }
    }
    Ok(())
}

fn push_rule(rules: &mut Vec<Rule>, include: bool, matcher: PathMatcher) {
    let rule = if include {
        Rule::include(matcher)
    } else {
        Rule::exclude(matcher)
    };
    rules.push(rule);
}

/// Splits a rule line into tokens on unescaped spaces.
///
/// `\<char>` pairs survive inside tokens untouched; the pattern
/// compiler resolves them later. Tab rejection already happened on
/// the raw line, so only spaces separate tokens here.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                current.push('\\');
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
                // A bare trailing backslash stays in the token; the
                // pattern compiler reports it as a malformed escape.
            }
            ' ' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            other => current.push(other),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
